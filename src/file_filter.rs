//! # File Filter Module
//!
//! Include/exclude glob pre-filtering of changed files. The filter is a
//! plain predicate applied before any header inspection: it decides which
//! files the run looks at, never how they are judged.

use std::path::Path;

use anyhow::{Context, Result};
use glob::Pattern;
use tracing::trace;

/// Result of a file filtering operation.
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  fn should_process(&self, path: &Path) -> Result<FilterResult>;
}

/// Filter backed by include and exclude glob pattern lists.
///
/// An empty include list admits every file; exclusion always wins over
/// inclusion. Patterns match against repository-relative paths.
pub struct GlobFilter {
  include: Vec<Pattern>,
  exclude: Vec<Pattern>,
}

impl GlobFilter {
  /// Compiles the pattern lists. An invalid glob is a run-level error.
  pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
    Ok(Self {
      include: compile_patterns(include)?,
      exclude: compile_patterns(exclude)?,
    })
  }

  /// A filter that admits everything.
  pub const fn allow_all() -> Self {
    Self {
      include: Vec::new(),
      exclude: Vec::new(),
    }
  }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
  patterns
    .iter()
    .map(|pattern| Pattern::new(pattern).with_context(|| format!("Invalid glob pattern: {pattern}")))
    .collect()
}

impl FileFilter for GlobFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    if !self.include.is_empty() && !self.include.iter().any(|pattern| pattern.matches_path(path)) {
      trace!("Skipping: {} (not in include patterns)", path.display());
      return Ok(FilterResult::skip("Not in include patterns"));
    }
    if self.exclude.iter().any(|pattern| pattern.matches_path(path)) {
      trace!("Skipping: {} (matches exclude pattern)", path.display());
      return Ok(FilterResult::skip("Matches exclude pattern"));
    }
    Ok(FilterResult::process())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_filter_admits_everything() {
    let filter = GlobFilter::allow_all();
    assert!(filter.should_process(Path::new("src/main.rs")).unwrap().should_process);
    assert!(filter.should_process(Path::new("anything.py")).unwrap().should_process);
  }

  #[test]
  fn test_include_patterns_restrict() {
    let filter = GlobFilter::new(&["src/**/*.py".to_string()], &[]).unwrap();
    assert!(filter.should_process(Path::new("src/a/b.py")).unwrap().should_process);

    let result = filter.should_process(Path::new("tools/b.py")).unwrap();
    assert!(!result.should_process);
    assert!(result.reason.is_some());
  }

  #[test]
  fn test_exclude_wins_over_include() {
    let filter = GlobFilter::new(&["**/*.py".to_string()], &["**/generated/**".to_string()]).unwrap();
    assert!(filter.should_process(Path::new("src/run.py")).unwrap().should_process);
    assert!(!filter.should_process(Path::new("src/generated/run.py")).unwrap().should_process);
  }

  #[test]
  fn test_invalid_glob_is_an_error() {
    assert!(GlobFilter::new(&["[".to_string()], &[]).is_err());
  }
}
