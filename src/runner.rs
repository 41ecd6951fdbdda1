//! # Run Orchestrator Module
//!
//! Drives one validation run: applies the include/exclude pre-filter,
//! evaluates every changed file, and aggregates the outcomes.
//!
//! Files are independent, so evaluation fans out over a bounded worker pool;
//! history lookup is the only I/O-bound step and runs on blocking threads
//! under a timeout. Outcomes are sorted by path before they are returned, so
//! a run's report is byte-stable regardless of the concurrency degree used
//! to compute it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{debug, trace};

use crate::comment_style;
use crate::diff::{ChangeStatus, ChangedFile};
use crate::file_filter::{FileFilter, GlobFilter};
use crate::header::extract_header;
use crate::history::{HistoryError, HistoryResolver};
use crate::rules::{self, Classification, Verdict};

/// Terminal outcome for one changed file. Every file that enters the run
/// yields exactly one of these.
#[derive(Debug)]
pub enum FileOutcome {
  /// The file was evaluated against the year rules.
  Checked(Verdict),
  /// The file's creation year could not be resolved. Kept distinct from a
  /// validation failure, but still fails the run.
  ResolutionFailed { path: PathBuf, error: HistoryError },
  /// The file was not evaluated (filtered out, unsupported type, or
  /// unreadable content).
  Skipped { path: PathBuf, reason: String },
}

impl FileOutcome {
  pub fn path(&self) -> &Path {
    match self {
      FileOutcome::Checked(verdict) => &verdict.path,
      FileOutcome::ResolutionFailed { path, .. } | FileOutcome::Skipped { path, .. } => path,
    }
  }

  /// Whether this outcome contributes to a failing exit code.
  pub fn is_failure(&self) -> bool {
    match self {
      FileOutcome::Checked(verdict) => !verdict.ok(),
      FileOutcome::ResolutionFailed { .. } => true,
      FileOutcome::Skipped { .. } => false,
    }
  }
}

/// Orchestrates one validation run over a set of changed files.
pub struct Runner {
  repo_root: PathBuf,
  resolver: Arc<dyn HistoryResolver>,
  filter: GlobFilter,
  current_year: i32,
  history_timeout: Duration,
}

impl Runner {
  pub fn new(
    repo_root: PathBuf,
    resolver: Arc<dyn HistoryResolver>,
    filter: GlobFilter,
    current_year: i32,
    history_timeout: Duration,
  ) -> Self {
    Self {
      repo_root,
      resolver,
      filter,
      current_year,
      history_timeout,
    }
  }

  /// Evaluates all files and returns their outcomes sorted by path.
  pub async fn run(&self, files: Vec<ChangedFile>) -> Result<Vec<FileOutcome>> {
    let limit = num_cpus::get().clamp(1, 8);
    debug!("Evaluating {} files with up to {} workers", files.len(), limit);

    let mut outcomes: Vec<FileOutcome> = stream::iter(files)
      .map(|file| self.check_file(file))
      .buffer_unordered(limit)
      .collect()
      .await;

    outcomes.sort_by(|a, b| a.path().cmp(b.path()));
    Ok(outcomes)
  }

  async fn check_file(&self, file: ChangedFile) -> FileOutcome {
    match self.filter.should_process(&file.path) {
      Ok(result) if !result.should_process => {
        return FileOutcome::Skipped {
          path: file.path,
          reason: result.reason.unwrap_or_else(|| "Filtered out".to_string()),
        };
      }
      Err(error) => {
        return FileOutcome::Skipped {
          path: file.path,
          reason: format!("Filter error: {error}"),
        };
      }
      Ok(_) => {}
    }

    // Deleted files carry no header requirement and have no content to read.
    if file.status == ChangeStatus::Deleted {
      return FileOutcome::Checked(Verdict::passing(&file.path));
    }

    let Some(family) = comment_style::family_for_path(&file.path) else {
      trace!("Skipping: {} (no comment style defined for extension)", file.path.display());
      return FileOutcome::Skipped {
        path: file.path,
        reason: "No comment style defined for extension".to_string(),
      };
    };

    let absolute = self.repo_root.join(&file.path);
    let bytes = match tokio::fs::read(&absolute).await {
      Ok(bytes) => bytes,
      Err(error) => {
        return FileOutcome::Skipped {
          path: file.path,
          reason: format!("Unreadable: {error}"),
        };
      }
    };
    let Ok(content) = String::from_utf8(bytes) else {
      trace!("Skipping: {} (not valid UTF-8)", file.path.display());
      return FileOutcome::Skipped {
        path: file.path,
        reason: "Not valid UTF-8".to_string(),
      };
    };

    let header = extract_header(&content);

    // Renames resolve history through the pre-rename path; new files have
    // no history and the resolver must not be called for them.
    let (classification, history_path) = match file.status {
      ChangeStatus::Added => (Classification::Added, None),
      ChangeStatus::Modified => (Classification::Modified, Some(file.path.clone())),
      ChangeStatus::Renamed => (
        Classification::Renamed {
          content_changed: file.content_changed,
        },
        Some(file.old_path.clone().unwrap_or_else(|| file.path.clone())),
      ),
      ChangeStatus::Deleted => (Classification::Deleted, None),
    };

    let creation_year = match history_path {
      Some(lookup_path) => match self.resolve_with_timeout(lookup_path).await {
        Ok(year) => year,
        Err(error) => {
          return FileOutcome::ResolutionFailed {
            path: file.path,
            error,
          };
        }
      },
      None => None,
    };

    FileOutcome::Checked(rules::evaluate(
      &file.path,
      classification,
      creation_year,
      self.current_year,
      family,
      &header,
    ))
  }

  /// Runs one history lookup on a blocking thread with a bounded timeout.
  /// A lookup that overruns becomes a resolution failure for that file
  /// only; the rest of the run proceeds.
  async fn resolve_with_timeout(&self, path: PathBuf) -> Result<Option<i32>, HistoryError> {
    let resolver = Arc::clone(&self.resolver);
    let lookup_path = path.clone();
    let lookup = tokio::task::spawn_blocking(move || resolver.resolve_creation_year(&lookup_path));

    match tokio::time::timeout(self.history_timeout, lookup).await {
      Ok(Ok(result)) => result,
      Ok(Err(_join_error)) => Err(HistoryError::Interrupted { path }),
      Err(_elapsed) => Err(HistoryError::Timeout {
        path,
        seconds: self.history_timeout.as_secs(),
      }),
    }
  }
}
