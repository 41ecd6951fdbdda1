//! # Report Module
//!
//! Aggregates per-file outcomes into a run summary and, on request, writes a
//! machine-readable JSON report for downstream tooling (CI annotations,
//! dashboards).

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::runner::FileOutcome;

/// One row of the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
  pub path: String,
  /// Stable diagnostic code name, `resolution-failed`, or `skipped`.
  pub code: String,
  pub ok: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expected: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub actual: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub detail: Option<String>,
}

impl FileRecord {
  fn from_outcome(outcome: &FileOutcome) -> Self {
    match outcome {
      FileOutcome::Checked(verdict) => Self {
        path: verdict.path.display().to_string(),
        code: verdict.code.as_str().to_string(),
        ok: verdict.ok(),
        expected: verdict.expected.map(|spec| spec.to_string()),
        actual: verdict.actual.map(|spec| spec.to_string()),
        detail: None,
      },
      FileOutcome::ResolutionFailed { path, error } => Self {
        path: path.display().to_string(),
        code: "resolution-failed".to_string(),
        ok: false,
        expected: None,
        actual: None,
        detail: Some(error.to_string()),
      },
      FileOutcome::Skipped { path, reason } => Self {
        path: path.display().to_string(),
        code: "skipped".to_string(),
        ok: true,
        expected: None,
        actual: None,
        detail: Some(reason.clone()),
      },
    }
  }
}

/// Summary of one validation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
  /// Files that were actually evaluated against the year rules.
  pub files_checked: usize,
  pub files_passed: usize,
  /// Validation failures plus history-resolution failures.
  pub files_failed: usize,
  pub files_skipped: usize,
  pub duration_secs: f64,
}

impl RunSummary {
  pub fn from_outcomes(outcomes: &[FileOutcome], duration: Duration) -> Self {
    let mut summary = Self {
      files_checked: 0,
      files_passed: 0,
      files_failed: 0,
      files_skipped: 0,
      duration_secs: duration.as_secs_f64(),
    };

    for outcome in outcomes {
      match outcome {
        FileOutcome::Checked(verdict) => {
          summary.files_checked += 1;
          if verdict.ok() {
            summary.files_passed += 1;
          } else {
            summary.files_failed += 1;
          }
        }
        FileOutcome::ResolutionFailed { .. } => {
          summary.files_checked += 1;
          summary.files_failed += 1;
        }
        FileOutcome::Skipped { .. } => summary.files_skipped += 1,
      }
    }

    summary
  }

  pub const fn all_passed(&self) -> bool {
    self.files_failed == 0
  }
}

/// Writes the JSON report to `output_path`.
pub fn write_json_report(output_path: &Path, outcomes: &[FileOutcome], summary: &RunSummary) -> Result<()> {
  #[derive(Serialize)]
  struct Report<'a> {
    summary: &'a RunSummary,
    files: Vec<FileRecord>,
  }

  let report = Report {
    summary,
    files: outcomes.iter().map(FileRecord::from_outcome).collect(),
  };

  let content = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
