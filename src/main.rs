//! # spdxlint
//!
//! A CI linter that validates SPDX copyright headers on changed files.

use std::process::ExitCode;

use spdxlint::cli::{Cli, run_check};

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run_check(cli.get_check_args()).await {
    Ok(code) => code,
    Err(error) => {
      // Run-level failures: no partial report, distinct exit code.
      eprintln!("ERROR: {error:#}");
      ExitCode::from(2)
    }
  }
}
