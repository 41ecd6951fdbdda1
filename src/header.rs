//! # Header Extractor Module
//!
//! Pure scanning of a file's leading comment block for the two SPDX header
//! lines:
//!
//! ```text
//! // SPDX-FileCopyrightText: 2023-2026 Example Co.
//! // SPDX-License-Identifier: GPL-3.0-or-later
//! ```
//!
//! Extraction is independent of which comment prefix a line actually uses;
//! the prefixes found are recorded so the rule engine can flag files whose
//! header uses the wrong style for the file type.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Year field of a copyright line, decided once at parse time and never
/// re-inspected as raw text afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearSpec {
  /// A single bare year, e.g. `2026`.
  Single(i32),
  /// A year range, e.g. `2023-2026`. Parsed values are preserved exactly as
  /// written, even when malformed (`start >= end`), so diagnostics can name
  /// the precise defect.
  Range { start: i32, end: i32 },
}

impl YearSpec {
  /// Parses a `YYYY` or `YYYY-YYYY` field.
  pub fn parse(field: &str) -> Option<Self> {
    match field.split_once('-') {
      Some((start, end)) => Some(YearSpec::Range {
        start: start.parse().ok()?,
        end: end.parse().ok()?,
      }),
      None => Some(YearSpec::Single(field.parse().ok()?)),
    }
  }

  pub const fn is_range(self) -> bool {
    matches!(self, YearSpec::Range { .. })
  }
}

impl fmt::Display for YearSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      YearSpec::Single(year) => write!(f, "{year}"),
      YearSpec::Range { start, end } => write!(f, "{start}-{end}"),
    }
  }
}

/// What was actually found in a file's leading comment block.
///
/// All fields are `None` when the corresponding line is absent; a missing
/// `copyright_line` means the file has no SPDX header at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderInfo {
  /// The raw copyright line, trimmed.
  pub copyright_line: Option<String>,
  /// 1-based line number of the copyright line.
  pub copyright_line_no: Option<usize>,
  /// The raw license-identifier line, trimmed.
  pub license_line: Option<String>,
  /// 1-based line number of the license line.
  pub license_line_no: Option<usize>,
  /// Comment prefix of the copyright line, as written.
  pub copyright_prefix: Option<String>,
  /// Comment prefix of the license line, as written.
  pub license_prefix: Option<String>,
  /// Parsed year field of the copyright line.
  pub years: Option<YearSpec>,
  /// Copyright holder text following the years.
  pub holder: Option<String>,
  /// License identifier following `SPDX-License-Identifier:`.
  pub license_id: Option<String>,
}

impl HeaderInfo {
  pub const fn has_copyright(&self) -> bool {
    self.copyright_line.is_some()
  }

  pub const fn has_license(&self) -> bool {
    self.license_line.is_some()
  }
}

static COPYRIGHT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(//|#)\s*SPDX-FileCopyrightText:\s*(\d{4}(?:-\d{4})?)\s+(\S.*)$").expect("copyright regex must compile")
});

static LICENSE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(//|#)\s*SPDX-License-Identifier:\s*(\S.*)$").expect("license regex must compile"));

/// Scans the leading comment block of `content` for SPDX header lines.
///
/// Only the block of lines at the top of the file that are blank or start
/// with a supported comment prefix is considered; scanning stops at the
/// first line of code. Matching is order-insensitive between the copyright
/// and license lines. The function is pure: no I/O, no global state.
pub fn extract_header(content: &str) -> HeaderInfo {
  let mut info = HeaderInfo::default();

  for (index, raw_line) in content.lines().enumerate() {
    // Tolerate a BOM on the first line.
    let line = if index == 0 {
      raw_line.trim_start_matches('\u{feff}').trim()
    } else {
      raw_line.trim()
    };

    if line.is_empty() {
      continue;
    }
    if !line.starts_with("//") && !line.starts_with('#') {
      break;
    }

    if info.copyright_line.is_none()
      && let Some(caps) = COPYRIGHT_REGEX.captures(line)
    {
      info.copyright_line = Some(line.to_string());
      info.copyright_line_no = Some(index + 1);
      info.copyright_prefix = Some(caps[1].to_string());
      info.years = YearSpec::parse(&caps[2]);
      let holder = caps[3].trim();
      if !holder.is_empty() {
        info.holder = Some(holder.to_string());
      }
      continue;
    }

    if info.license_line.is_none()
      && let Some(caps) = LICENSE_REGEX.captures(line)
    {
      info.license_line = Some(line.to_string());
      info.license_line_no = Some(index + 1);
      info.license_prefix = Some(caps[1].to_string());
      info.license_id = Some(caps[2].trim().to_string());
    }

    if info.copyright_line.is_some() && info.license_line.is_some() {
      break;
    }
  }

  info
}
