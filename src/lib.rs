//! # spdxlint
//!
//! A CI linter that validates SPDX copyright headers on changed files.
//!
//! `spdxlint` diffs the repository against a base reference, classifies each
//! changed file, recovers the file's true creation year from git history,
//! and checks that the `SPDX-FileCopyrightText` line carries the year or
//! year range the policy requires:
//!
//! * new files show a single current year;
//! * files modified from an earlier creation year show a range ending in
//!   the current year;
//! * untouched old files and deletions are left alone.
//!
//! Failures are reported as bilingual (English + Simplified Chinese)
//! diagnostics, one block per file, with a specific code for each rule a
//! header can violate. The tool never rewrites files.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use spdxlint::diff;
//! use spdxlint::file_filter::GlobFilter;
//! use spdxlint::history::GitHistoryResolver;
//! use spdxlint::runner::Runner;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo_root = std::path::PathBuf::from(".");
//!     let changed = diff::list_changed_files(&repo_root, "origin/main")?;
//!
//!     let runner = Runner::new(
//!         repo_root.clone(),
//!         Arc::new(GitHistoryResolver::new(repo_root)),
//!         GlobFilter::allow_all(),
//!         2026,
//!         Duration::from_secs(10),
//!     );
//!
//!     let outcomes = runner.run(changed).await?;
//!     for outcome in &outcomes {
//!         if outcome.is_failure() {
//!             println!("failed: {}", outcome.path().display());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`rules`] - The year rule engine, the sole pass/fail authority
//! * [`header`] - SPDX header extraction from leading comment blocks
//! * [`history`] - Creation-year resolution from git history
//! * [`diff`] - Change classification against a base reference
//! * [`diagnostics`] - Bilingual failure messages
//! * [`runner`] - Per-run orchestration and the worker pool

pub mod cli;
pub mod comment_style;
pub mod diagnostics;
pub mod diff;
pub mod file_filter;
pub mod header;
pub mod history;
pub mod logging;
pub mod output;
pub mod report;
pub mod rules;
pub mod runner;
pub mod workspace;
