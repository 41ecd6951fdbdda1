//! # Output Module
//!
//! This module centralizes all user-facing output for spdxlint.
//! It provides consistent formatting, colors, and symbols for terminal
//! output.
//!
//! ## Design Goals
//!
//! - **Actionable**: every failure block names the file and the fix
//! - **Scannable**: one block per failing file, then a single summary line
//! - **Progressive**: more detail with `-v`, silence with `-q`
//! - **Scriptable**: stdout stays predictable for piping/automation

use owo_colors::{OwoColorize, Stream};

use crate::diagnostics::{format_resolution_failure, format_verdict};
use crate::logging::is_quiet;
use crate::report::RunSummary;
use crate::runner::FileOutcome;

/// Symbols used in output
pub mod symbols {
  /// All checks passed
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Validation failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Print the initial "Checking N files..." message.
pub fn print_start_message(file_count: usize, base: Option<&str>) {
  if is_quiet() {
    return;
  }

  let files_word = if file_count == 1 { "file" } else { "files" };
  match base {
    Some(reference) => println!("Checking {file_count} changed {files_word} against {reference}..."),
    None => println!("Checking {file_count} tracked {files_word}..."),
  }
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print one bilingual diagnostic block per failing outcome.
///
/// Passing and skipped files produce no output. In quiet mode only the
/// failing file paths are printed, for scripting.
pub fn print_failures(outcomes: &[FileOutcome]) {
  let failing: Vec<&FileOutcome> = outcomes.iter().filter(|outcome| outcome.is_failure()).collect();
  if failing.is_empty() {
    return;
  }

  if is_quiet() {
    for outcome in &failing {
      println!("{}", outcome.path().display());
    }
    return;
  }

  println!("SPDX header validation failed:");
  for outcome in &failing {
    let message = match outcome {
      FileOutcome::Checked(verdict) => format_verdict(verdict),
      FileOutcome::ResolutionFailed { path, error } => Some(format_resolution_failure(path, error)),
      FileOutcome::Skipped { .. } => None,
    };
    if let Some(message) = message {
      println!();
      println!("{message}");
    }
  }
}

/// Print the summary line with checked/passed/failed counts.
pub fn print_summary(summary: &RunSummary) {
  if is_quiet() {
    return;
  }

  let symbol = if summary.all_passed() {
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()).to_string()
  } else {
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  };

  let mut line = format!(
    "{symbol} {} checked, {} passed, {} failed",
    summary.files_checked, summary.files_passed, summary.files_failed
  );
  if summary.files_skipped > 0 {
    line.push_str(&format!(", {} skipped", summary.files_skipped));
  }
  println!("{line} ({:.2}s)", summary.duration_secs);
}

/// Print the success message for a run with no failures.
pub fn print_all_files_ok() {
  if !is_quiet() {
    println!(
      "{} All checked files have valid SPDX headers.",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
    );
  }
}

/// Print the message for a run with nothing to check.
pub fn print_no_changes() {
  if !is_quiet() {
    println!("No applicable file changes detected; skipping SPDX validation.");
  }
}
