//! # Workspace Module
//!
//! Locates the git repository the run operates on. Validation is always
//! anchored to a repository: without one there is no diff and no history,
//! so discovery failure is a run-level error, not a per-file condition.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{ErrorCode, Repository};

/// Returns the working-directory root of the repository containing `start`,
/// or `None` when `start` is not inside a git repository.
pub fn discover_repo_root(start: &Path) -> Result<Option<PathBuf>> {
  match Repository::discover(start) {
    Ok(repo) => Ok(repo.workdir().map(Path::to_path_buf)),
    Err(error) if error.code() == ErrorCode::NotFound => Ok(None),
    Err(error) => Err(error).context("Failed to discover git repository"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_non_repository_directory_yields_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert_eq!(discover_repo_root(dir.path()).expect("discover"), None);
  }

  #[test]
  fn test_discovers_root_from_subdirectory() {
    let dir = tempfile::tempdir().expect("tempdir");
    Repository::init(dir.path()).expect("init");
    let nested = dir.path().join("a/b");
    std::fs::create_dir_all(&nested).expect("mkdir");

    let root = discover_repo_root(&nested).expect("discover").expect("root");
    assert_eq!(
      root.canonicalize().expect("canonicalize"),
      dir.path().canonicalize().expect("canonicalize")
    );
  }
}
