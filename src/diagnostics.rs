//! # Diagnostics Formatter Module
//!
//! Renders each failing [`Verdict`] as a bilingual, human-readable message:
//! one English paragraph followed by the equivalent Simplified Chinese
//! paragraph. All variable data (years, paths, holders) is substituted from
//! the verdict so the two languages stay in lockstep; there is exactly one
//! message per failing file and none for passing files.
//!
//! The `Current:`/`Expected:` detail lines embed the actual and expected
//! year values verbatim, so they can be parsed back out of a rendered
//! message without loss.

use std::path::Path;

use crate::comment_style::CommentFamily;
use crate::header::YearSpec;
use crate::history::HistoryError;
use crate::rules::{DiagnosticCode, Verdict};

/// Placeholder holder used in suggested headers when the file has none.
const DEFAULT_HOLDER: &str = "Your Company Name";

/// Formats a failing verdict as a two-paragraph bilingual message.
///
/// Returns `None` for passing verdicts: files that are `Ok` produce no
/// output at all.
pub fn format_verdict(verdict: &Verdict) -> Option<String> {
  let (english, chinese) = sentences(verdict)?;

  let mut message = format!("[{}] {}", verdict.path.display(), english);
  push_detail_lines(&mut message, verdict, "Current:", "Expected:");
  message.push('\n');
  message.push_str(&chinese);
  push_detail_lines(&mut message, verdict, "当前内容：", "建议修改：");

  Some(message)
}

/// Formats a history-resolution failure, which is a distinct kind of outcome
/// from a validation failure and must never read as a pass.
pub fn format_resolution_failure(path: &Path, error: &HistoryError) -> String {
  format!(
    "[{}] Could not determine the file's creation year: {}\n无法确定该文件的创建年份，git 历史读取失败，请检查检出深度与仓库状态。",
    path.display(),
    error
  )
}

fn sentences(verdict: &Verdict) -> Option<(String, String)> {
  let suggested = suggested_header(verdict);

  let pair = match verdict.code {
    DiagnosticCode::Ok => return None,
    DiagnosticCode::MissingHeader => (
      format!("Missing SPDX copyright header at the top of the file; add: {suggested}"),
      format!("缺少 SPDX 版权头，请在文件顶部添加：{suggested}"),
    ),
    DiagnosticCode::MissingLicenseLine => (
      "Missing SPDX license identifier line below the copyright header.".to_string(),
      "缺少 SPDX-License-Identifier 行，请紧跟在版权头下方添加。".to_string(),
    ),
    DiagnosticCode::CommentStyleMismatch => {
      let prefix = verdict.family.map_or("//", CommentFamily::prefix);
      (
        format!("SPDX header lines must both use the `{prefix}` comment prefix for this file type."),
        format!("SPDX 版权头与许可证行需统一使用该文件类型的 `{prefix}` 注释前缀。"),
      )
    }
    DiagnosticCode::NewFileHasRange => (
      format!("New files must use a single year (no range) in the SPDX header, e.g.: {suggested}"),
      format!("新增文件的 SPDX 版权头必须只包含当前年份，不能使用年份范围，例如：{suggested}"),
    ),
    DiagnosticCode::NewFileWrongYear => {
      let year = expected_text(verdict);
      (
        format!("SPDX header year should be {year} for new files."),
        format!("新增文件的 SPDX 版权年份应为 {year}。"),
      )
    }
    DiagnosticCode::StaleYearNoRange => match verdict.expected {
      Some(range @ YearSpec::Range { .. }) => (
        format!("File predates current year; update SPDX header to use a year range {range}."),
        format!("文件创建年份早于当前年份，请将 SPDX 版权头更新为年份范围 {range}。"),
      ),
      _ => {
        let year = expected_text(verdict);
        (
          format!("SPDX header year should be {year}."),
          format!("请将 SPDX 版权年份更新为 {year}。"),
        )
      }
    },
    DiagnosticCode::RangeEndWrongYear => {
      let end = match verdict.expected {
        Some(YearSpec::Range { end, .. }) => end.to_string(),
        _ => expected_text(verdict),
      };
      (
        format!("Update SPDX year range end to {end}."),
        format!("请将 SPDX 年份范围的结束年份更新为 {end}。"),
      )
    }
    DiagnosticCode::RangeStartWrongYear => {
      let start = match verdict.expected {
        Some(YearSpec::Range { start, .. }) => start.to_string(),
        _ => expected_text(verdict),
      };
      (
        format!("Year range should start at the file creation year {start}."),
        format!("年份范围应以文件创建年份 {start} 开始。"),
      )
    }
  };

  Some(pair)
}

fn push_detail_lines(message: &mut String, verdict: &Verdict, current_label: &str, expected_label: &str) {
  if let Some(actual) = verdict.actual {
    message.push_str(&format!("\n  {current_label} {actual}"));
  }
  if let Some(expected) = verdict.expected {
    message.push_str(&format!("\n  {expected_label} {expected}"));
  }
}

fn expected_text(verdict: &Verdict) -> String {
  verdict.expected.map_or_else(|| "?".to_string(), |spec| spec.to_string())
}

fn suggested_header(verdict: &Verdict) -> String {
  let prefix = verdict.family.map_or("//", CommentFamily::prefix);
  let holder = verdict.holder.as_deref().unwrap_or(DEFAULT_HOLDER);
  format!("{prefix} SPDX-FileCopyrightText: {} {holder}", expected_text(verdict))
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  fn verdict(code: DiagnosticCode, expected: Option<YearSpec>, actual: Option<YearSpec>) -> Verdict {
    Verdict {
      path: PathBuf::from("src/widget.cpp"),
      code,
      expected,
      actual,
      holder: Some("Example Co.".to_string()),
      family: Some(CommentFamily::Slashes),
    }
  }

  /// Parses the year specs back out of a rendered message's detail lines.
  fn embedded_years(message: &str) -> (Option<YearSpec>, Option<YearSpec>) {
    let find = |label: &str| {
      message
        .lines()
        .find_map(|line| line.trim().strip_prefix(label))
        .and_then(|rest| YearSpec::parse(rest.trim()))
    };
    (find("Current:"), find("Expected:"))
  }

  #[test]
  fn test_ok_verdict_produces_no_output() {
    let passing = verdict(DiagnosticCode::Ok, Some(YearSpec::Single(2026)), Some(YearSpec::Single(2026)));
    assert_eq!(format_verdict(&passing), None);
  }

  #[test]
  fn test_message_is_bilingual_and_names_the_path() {
    let failing = verdict(
      DiagnosticCode::StaleYearNoRange,
      Some(YearSpec::Range { start: 2023, end: 2026 }),
      Some(YearSpec::Single(2026)),
    );
    let message = format_verdict(&failing).unwrap();
    assert!(message.contains("[src/widget.cpp]"));
    assert!(message.contains("year range 2023-2026"));
    assert!(message.contains("年份范围 2023-2026"));
  }

  #[test]
  fn test_every_failing_code_formats() {
    let failing = [
      DiagnosticCode::MissingHeader,
      DiagnosticCode::MissingLicenseLine,
      DiagnosticCode::NewFileHasRange,
      DiagnosticCode::NewFileWrongYear,
      DiagnosticCode::StaleYearNoRange,
      DiagnosticCode::RangeEndWrongYear,
      DiagnosticCode::RangeStartWrongYear,
      DiagnosticCode::CommentStyleMismatch,
    ];
    for code in failing {
      let message = format_verdict(&verdict(code, Some(YearSpec::Single(2026)), None)).unwrap();
      assert!(!message.is_empty(), "{code:?} must render");
    }
  }

  #[test]
  fn test_round_trip_of_expected_and_actual_years() {
    let cases = [
      (Some(YearSpec::Range { start: 2023, end: 2026 }), Some(YearSpec::Single(2026))),
      (Some(YearSpec::Single(2026)), Some(YearSpec::Range { start: 2022, end: 2026 })),
      (Some(YearSpec::Range { start: 2023, end: 2026 }), Some(YearSpec::Range { start: 2022, end: 2025 })),
    ];
    for (expected, actual) in cases {
      let message = format_verdict(&verdict(DiagnosticCode::RangeEndWrongYear, expected, actual)).unwrap();
      assert_eq!(embedded_years(&message), (actual, expected));
    }
  }

  #[test]
  fn test_suggested_header_uses_file_holder_and_family() {
    let failing = Verdict {
      path: PathBuf::from("run.py"),
      code: DiagnosticCode::NewFileHasRange,
      expected: Some(YearSpec::Single(2026)),
      actual: Some(YearSpec::Range { start: 2023, end: 2026 }),
      holder: Some("Example Co.".to_string()),
      family: Some(CommentFamily::Hash),
    };
    let message = format_verdict(&failing).unwrap();
    assert!(message.contains("# SPDX-FileCopyrightText: 2026 Example Co."));
  }

  #[test]
  fn test_missing_holder_falls_back_to_placeholder() {
    let failing = Verdict {
      holder: None,
      ..verdict(DiagnosticCode::MissingHeader, Some(YearSpec::Single(2026)), None)
    };
    let message = format_verdict(&failing).unwrap();
    assert!(message.contains(DEFAULT_HOLDER));
  }

  #[test]
  fn test_resolution_failure_message_is_bilingual() {
    let error = HistoryError::Timeout {
      path: PathBuf::from("src/widget.cpp"),
      seconds: 10,
    };
    let message = format_resolution_failure(Path::new("src/widget.cpp"), &error);
    assert!(message.contains("creation year"));
    assert!(message.contains("创建年份"));
  }
}
