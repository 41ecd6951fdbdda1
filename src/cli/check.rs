//! # Check Command
//!
//! This module implements the check command: diff the repository against a
//! base reference, validate the SPDX header of every changed file, and
//! report the outcomes. This is the default command when no subcommand is
//! specified.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::Args;
use tracing::debug;

use crate::diff;
use crate::file_filter::GlobFilter;
use crate::history::GitHistoryResolver;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_all_files_ok, print_blank_line, print_failures, print_no_changes, print_start_message, print_summary};
use crate::report::{self, RunSummary};
use crate::runner::Runner;
use crate::workspace::discover_repo_root;

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  /// Base reference to diff against
  #[arg(long, value_name = "REF", env = "GITHUB_BASE_REF", default_value = "origin/main")]
  pub base: String,

  /// Glob patterns of files to include (comma-separated, repeatable;
  /// default: all changed files)
  #[arg(long, value_name = "GLOBS", value_delimiter = ',')]
  pub include: Vec<String>,

  /// Glob patterns of files to exclude (comma-separated, repeatable)
  #[arg(long, value_name = "GLOBS", value_delimiter = ',')]
  pub exclude: Vec<String>,

  /// Current year for validation (default: current UTC year)
  #[arg(long, value_name = "YEAR")]
  pub year: Option<i32>,

  /// Check all tracked files in the repository instead of only changed files
  #[arg(long)]
  pub all_files: bool,

  /// Timeout in seconds for each git history lookup
  #[arg(long, value_name = "SECONDS", default_value_t = 10)]
  pub history_timeout: u64,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except failing file paths
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Write a machine-readable JSON report to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

/// Run the check command with the given arguments.
///
/// Returns exit code 0 when every non-excluded changed file passes, 1 when
/// any file fails validation or history resolution; run-level errors (no
/// repository, unknown base ref, unreadable diff) propagate as `Err` and
/// map to exit code 2 in `main`.
pub async fn run_check(args: CheckArgs) -> Result<ExitCode> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_year = args.year.unwrap_or_else(|| Utc::now().year());
  debug!("Validating against year {current_year}");

  let current_dir = std::env::current_dir().context("Failed to get current directory")?;
  let repo_root = discover_repo_root(&current_dir)?
    .context("Not inside a git repository; SPDX validation needs a repository checkout")?;
  debug!("Using repository root: {}", repo_root.display());

  // Run-level failures (unknown base ref, unreadable diff) abort here,
  // before any per-file processing begins.
  let changed = if args.all_files {
    diff::list_all_files(&repo_root)?
  } else {
    diff::list_changed_files(&repo_root, &args.base)?
  };

  if changed.is_empty() {
    print_no_changes();
    return Ok(ExitCode::SUCCESS);
  }

  let filter = GlobFilter::new(&args.include, &args.exclude)?;
  let resolver = Arc::new(GitHistoryResolver::new(repo_root.clone()));
  let runner = Runner::new(
    repo_root,
    resolver,
    filter,
    current_year,
    Duration::from_secs(args.history_timeout),
  );

  print_start_message(changed.len(), (!args.all_files).then_some(args.base.as_str()));

  let start_time = Instant::now();
  let outcomes = runner.run(changed).await?;
  let summary = RunSummary::from_outcomes(&outcomes, start_time.elapsed());

  print_blank_line();
  if summary.all_passed() {
    print_all_files_ok();
  } else {
    print_failures(&outcomes);
    print_blank_line();
  }
  print_summary(&summary);

  // Generate JSON report if requested
  if let Some(ref output_path) = args.report_json {
    if let Err(error) = report::write_json_report(output_path, &outcomes, &summary) {
      eprintln!("Error generating JSON report: {error}");
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  if summary.all_passed() {
    Ok(ExitCode::SUCCESS)
  } else {
    Ok(ExitCode::from(1))
  }
}
