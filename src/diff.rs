//! # Change Classifier Module
//!
//! Turns a git diff between a base reference and HEAD into one
//! [`ChangedFile`] per path, classified as Added, Modified, Deleted, or
//! Renamed. The diff is taken from the merge base of the two refs (the
//! `base...HEAD` convention used by CI), with rename detection enabled so a
//! moved file keeps its identity and its history.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{Delta, DiffFindOptions, Repository};
use tracing::debug;

/// How a file changed relative to the base reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
  Added,
  Modified,
  Deleted,
  Renamed,
}

/// One changed file, immutable once constructed; exactly one per path per
/// run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
  /// Path relative to the repository root (the post-rename path for
  /// renames, the removed path for deletions).
  pub path: PathBuf,
  pub status: ChangeStatus,
  /// Pre-rename path, present only for renames.
  pub old_path: Option<PathBuf>,
  /// Whether the blob content actually changed. Always true for
  /// Added/Modified/Deleted; computed for renames so a pure move can be
  /// told apart from a move-and-edit.
  pub content_changed: bool,
}

/// Lists files changed between `merge_base(base, HEAD)` and HEAD.
///
/// # Errors
///
/// Returns an error when the repository cannot be opened, the base
/// reference does not resolve, or the diff cannot be computed. These are
/// run-level failures: no per-file processing may start after one.
pub fn list_changed_files(repo_root: &Path, base: &str) -> Result<Vec<ChangedFile>> {
  let repo = Repository::open(repo_root)
    .with_context(|| format!("Failed to open git repository at {}", repo_root.display()))?;

  let base_commit = repo
    .revparse_single(base)
    .with_context(|| format!("Failed to find base reference: {base}"))?
    .peel_to_commit()
    .with_context(|| format!("Failed to get commit for base reference: {base}"))?;

  let head_commit = repo
    .head()
    .and_then(|head| head.peel_to_commit())
    .context("Failed to get HEAD commit")?;

  let merge_base = repo
    .merge_base(base_commit.id(), head_commit.id())
    .with_context(|| format!("Failed to find merge base of {base} and HEAD"))?;
  let merge_base_tree = repo
    .find_commit(merge_base)
    .and_then(|commit| commit.tree())
    .context("Failed to get tree for merge base")?;
  let head_tree = head_commit.tree().context("Failed to get tree for HEAD commit")?;

  let mut diff = repo
    .diff_tree_to_tree(Some(&merge_base_tree), Some(&head_tree), None)
    .context("Failed to diff base against HEAD")?;

  let mut find_opts = DiffFindOptions::new();
  find_opts.renames(true);
  diff
    .find_similar(Some(&mut find_opts))
    .context("Failed to run rename detection on diff")?;

  let mut changed = Vec::new();
  for delta in diff.deltas() {
    let entry = match delta.status() {
      Delta::Added => delta.new_file().path().map(|path| ChangedFile {
        path: path.to_path_buf(),
        status: ChangeStatus::Added,
        old_path: None,
        content_changed: true,
      }),
      // Copies carry history on the git side but are fresh content here;
      // classify them with modifications, as the CI policy does.
      Delta::Modified | Delta::Copied => delta.new_file().path().map(|path| ChangedFile {
        path: path.to_path_buf(),
        status: ChangeStatus::Modified,
        old_path: None,
        content_changed: true,
      }),
      Delta::Deleted => delta.old_file().path().map(|path| ChangedFile {
        path: path.to_path_buf(),
        status: ChangeStatus::Deleted,
        old_path: None,
        content_changed: true,
      }),
      Delta::Renamed => match (delta.old_file().path(), delta.new_file().path()) {
        (Some(old_path), Some(new_path)) => Some(ChangedFile {
          path: new_path.to_path_buf(),
          status: ChangeStatus::Renamed,
          old_path: Some(old_path.to_path_buf()),
          content_changed: delta.old_file().id() != delta.new_file().id(),
        }),
        _ => None,
      },
      _ => None,
    };
    if let Some(file) = entry {
      changed.push(file);
    }
  }

  changed.sort_by(|a, b| a.path.cmp(&b.path));
  debug!("Found {} changed files against {}", changed.len(), base);
  Ok(changed)
}

/// Lists every tracked file, classified as Modified, for full-repository
/// audits (`--all-files`).
pub fn list_all_files(repo_root: &Path) -> Result<Vec<ChangedFile>> {
  let repo = Repository::open(repo_root)
    .with_context(|| format!("Failed to open git repository at {}", repo_root.display()))?;
  let index = repo.index().context("Failed to read git index")?;

  let mut files: Vec<ChangedFile> = index
    .iter()
    .map(|entry| ChangedFile {
      path: PathBuf::from(String::from_utf8_lossy(&entry.path).into_owned()),
      status: ChangeStatus::Modified,
      old_path: None,
      content_changed: true,
    })
    .collect();

  files.sort_by(|a, b| a.path.cmp(&b.path));
  debug!("Found {} tracked files", files.len());
  Ok(files)
}
