//! # Year Rule Engine Module
//!
//! The sole decision authority for pass/fail. Given a file's change
//! classification, its resolved creation year, the run's current year, and
//! the header actually found in its text, [`evaluate`] computes the value a
//! correct header must contain and emits exactly one [`Verdict`] with a
//! specific [`DiagnosticCode`].
//!
//! The engine is a pure function: the current year is threaded in explicitly
//! (never read from the process clock here) so tests can pin arbitrary
//! years, and history lookups happen upstream of the call.

use std::path::{Path, PathBuf};

use crate::comment_style::CommentFamily;
use crate::header::{HeaderInfo, YearSpec};

/// How a file changed relative to the base reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
  Added,
  Modified,
  Deleted,
  /// Renamed files inherit the Modified rule against the old path's history,
  /// whether or not the content changed.
  Renamed { content_changed: bool },
}

/// Closed set of diagnostic codes, one per rule the header can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCode {
  /// No SPDX copyright line in the leading comment block.
  MissingHeader,
  /// Copyright line present but no `SPDX-License-Identifier` line.
  MissingLicenseLine,
  /// A new file used a year range; new files have no prior history.
  NewFileHasRange,
  /// A new file's single year is not the current year.
  NewFileWrongYear,
  /// A modified file shows a single year (or a spurious range) where the
  /// policy requires the current year or a range ending in it.
  StaleYearNoRange,
  /// Range present but its end is not the current year.
  RangeEndWrongYear,
  /// Range present but its start is not the file's creation year.
  RangeStartWrongYear,
  /// Header lines disagree on comment prefix, or use the wrong family for
  /// the file type.
  CommentStyleMismatch,
  Ok,
}

impl DiagnosticCode {
  /// Stable machine-readable name, used in the JSON report.
  pub const fn as_str(self) -> &'static str {
    match self {
      DiagnosticCode::MissingHeader => "missing-header",
      DiagnosticCode::MissingLicenseLine => "missing-license-line",
      DiagnosticCode::NewFileHasRange => "new-file-has-range",
      DiagnosticCode::NewFileWrongYear => "new-file-wrong-year",
      DiagnosticCode::StaleYearNoRange => "stale-year-no-range",
      DiagnosticCode::RangeEndWrongYear => "range-end-wrong-year",
      DiagnosticCode::RangeStartWrongYear => "range-start-wrong-year",
      DiagnosticCode::CommentStyleMismatch => "comment-style-mismatch",
      DiagnosticCode::Ok => "ok",
    }
  }
}

/// Terminal result of checking one file. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
  pub path: PathBuf,
  pub code: DiagnosticCode,
  /// The value a correct header must contain, when one can be named.
  pub expected: Option<YearSpec>,
  /// The years actually found in the file, when a header was present.
  pub actual: Option<YearSpec>,
  /// Holder text found in the file, carried for diagnostics.
  pub holder: Option<String>,
  /// Expected comment family of the file, carried for diagnostics.
  pub family: Option<CommentFamily>,
}

impl Verdict {
  pub fn ok(&self) -> bool {
    self.code == DiagnosticCode::Ok
  }

  /// A passing verdict with no header requirement, used for deleted files.
  pub fn passing(path: &Path) -> Self {
    Self {
      path: path.to_path_buf(),
      code: DiagnosticCode::Ok,
      expected: None,
      actual: None,
      holder: None,
      family: None,
    }
  }
}

/// Evaluates the ordered decision table; first matching rule wins.
///
/// `creation_year` is the calendar year of the file's earliest commit,
/// resolved through the old path for renames. It is absent only for
/// genuinely new files, for which the resolver must not have been called.
pub fn evaluate(
  path: &Path,
  classification: Classification,
  creation_year: Option<i32>,
  current_year: i32,
  family: CommentFamily,
  header: &HeaderInfo,
) -> Verdict {
  let verdict = |code: DiagnosticCode, expected: Option<YearSpec>| Verdict {
    path: path.to_path_buf(),
    code,
    expected,
    actual: header.years,
    holder: header.holder.clone(),
    family: Some(family),
  };

  // Rule 1: deleted files carry no header requirement.
  if classification == Classification::Deleted {
    return Verdict::passing(path);
  }

  // Rules 2-3: both header lines must be present.
  if !header.has_copyright() {
    return verdict(DiagnosticCode::MissingHeader, Some(YearSpec::Single(current_year)));
  }
  if !header.has_license() {
    return verdict(DiagnosticCode::MissingLicenseLine, None);
  }

  // Rule 4: the two lines must agree on prefix and match the file's family.
  let prefixes_ok = match (header.copyright_prefix.as_deref(), header.license_prefix.as_deref()) {
    (Some(copyright), Some(license)) => copyright == license && copyright == family.prefix(),
    _ => false,
  };
  if !prefixes_ok {
    return verdict(DiagnosticCode::CommentStyleMismatch, None);
  }

  let Some(actual) = header.years else {
    // A matched copyright line always carries a parsed year field; treat a
    // gap here as no header rather than panic.
    return verdict(DiagnosticCode::MissingHeader, Some(YearSpec::Single(current_year)));
  };

  match classification {
    Classification::Added => {
      let expected = YearSpec::Single(current_year);
      match actual {
        YearSpec::Range { .. } => verdict(DiagnosticCode::NewFileHasRange, Some(expected)),
        YearSpec::Single(year) if year != current_year => verdict(DiagnosticCode::NewFileWrongYear, Some(expected)),
        YearSpec::Single(_) => verdict(DiagnosticCode::Ok, Some(expected)),
      }
    }
    Classification::Modified | Classification::Renamed { .. } => {
      evaluate_modified(verdict, creation_year, current_year, actual)
    }
    // Handled above; kept for exhaustiveness.
    Classification::Deleted => Verdict::passing(path),
  }
}

/// The Modified branch of the decision table (rule 6), also inherited by
/// renames (rule 7).
fn evaluate_modified(
  verdict: impl Fn(DiagnosticCode, Option<YearSpec>) -> Verdict,
  creation_year: Option<i32>,
  current_year: i32,
  actual: YearSpec,
) -> Verdict {
  // A file whose history is empty (or that was created this year) must show
  // a single bare current year; a range would claim history it doesn't have.
  let creation = creation_year.unwrap_or(current_year);

  if creation >= current_year {
    let expected = YearSpec::Single(current_year);
    return match actual {
      YearSpec::Single(year) if year == current_year => verdict(DiagnosticCode::Ok, Some(expected)),
      _ => verdict(DiagnosticCode::StaleYearNoRange, Some(expected)),
    };
  }

  let expected = YearSpec::Range {
    start: creation,
    end: current_year,
  };
  match actual {
    YearSpec::Single(_) => verdict(DiagnosticCode::StaleYearNoRange, Some(expected)),
    YearSpec::Range { end, .. } if end != current_year => verdict(DiagnosticCode::RangeEndWrongYear, Some(expected)),
    YearSpec::Range { start, .. } if start != creation => verdict(DiagnosticCode::RangeStartWrongYear, Some(expected)),
    YearSpec::Range { .. } => verdict(DiagnosticCode::Ok, Some(expected)),
  }
}
