//! # History Resolver Module
//!
//! Recovers a file's true creation year from version-control history: the
//! calendar year of the earliest commit that introduced the path, following
//! renames back to the pre-rename path.
//!
//! Resolution is modeled as an injected capability ([`HistoryResolver`]) so
//! the rule engine stays pure and unit-testable without a repository
//! checkout. Failures are typed and propagated; a file whose history cannot
//! be read must surface as a resolution failure, never as a pass.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike};
use git2::{Commit, Delta, DiffFindOptions, Oid, Repository, Sort, Tree};
use thiserror::Error;
use tracing::trace;

/// How many rename hops to follow when locating the original path. Deep
/// rename chains beyond this resolve to the earliest hop reached.
const MAX_RENAME_FOLLOW: u32 = 8;

/// Failure to resolve a creation year for a specific path.
#[derive(Debug, Error)]
pub enum HistoryError {
  #[error("git history for {path} could not be read: {source}")]
  Unreadable {
    path: PathBuf,
    #[source]
    source: git2::Error,
  },
  #[error("git history lookup for {path} timed out after {seconds}s")]
  Timeout { path: PathBuf, seconds: u64 },
  #[error("git history lookup for {path} was interrupted")]
  Interrupted { path: PathBuf },
}

/// Capability for looking up a file's creation year.
///
/// Callers must not invoke this for files classified as Added: a genuinely
/// new file has no history to resolve.
pub trait HistoryResolver: Send + Sync {
  /// Returns the calendar year of the earliest commit touching `path`, or
  /// `None` when no recorded commit introduces it.
  fn resolve_creation_year(&self, path: &Path) -> Result<Option<i32>, HistoryError>;
}

/// git2-backed resolver rooted at a repository working directory.
///
/// The repository handle is opened per lookup; `git2::Repository` is not
/// `Sync`, and per-call handles let lookups run on any worker thread.
pub struct GitHistoryResolver {
  repo_root: PathBuf,
}

impl GitHistoryResolver {
  pub fn new(repo_root: impl Into<PathBuf>) -> Self {
    Self {
      repo_root: repo_root.into(),
    }
  }
}

impl HistoryResolver for GitHistoryResolver {
  fn resolve_creation_year(&self, path: &Path) -> Result<Option<i32>, HistoryError> {
    let unreadable = |source| HistoryError::Unreadable {
      path: path.to_path_buf(),
      source,
    };

    let repo = Repository::open(&self.repo_root).map_err(unreadable)?;
    let head = repo.head().and_then(|head| head.peel_to_commit()).map_err(unreadable)?;

    let introduced = introduction_of(&repo, head.id(), path, MAX_RENAME_FOLLOW).map_err(unreadable)?;
    let year = introduced.map(|commit| {
      trace!("{} introduced in {}", path.display(), commit.id());
      commit_year(&commit)
    });
    Ok(year)
  }
}

/// Finds the oldest commit reachable from `start` in which `path` appears
/// but is absent from every parent, then follows a rename at that point if
/// the introducing commit moved another path into place.
fn introduction_of<'repo>(
  repo: &'repo Repository,
  start: Oid,
  path: &Path,
  follow_budget: u32,
) -> Result<Option<Commit<'repo>>, git2::Error> {
  let mut revwalk = repo.revwalk()?;
  revwalk.push(start)?;
  revwalk.set_sorting(Sort::TIME)?;

  // The walk is newest-first; keep overwriting so the oldest introduction
  // wins when a path was deleted and re-added.
  let mut introduced: Option<Commit<'repo>> = None;
  for oid in revwalk {
    let commit = repo.find_commit(oid?)?;
    if !tree_contains(&commit.tree()?, path) {
      continue;
    }
    let in_any_parent = commit
      .parents()
      .any(|parent| parent.tree().is_ok_and(|tree| tree_contains(&tree, path)));
    if !in_any_parent {
      introduced = Some(commit);
    }
  }

  let Some(commit) = introduced else {
    return Ok(None);
  };

  if follow_budget > 0
    && let Some((parent_id, old_path)) = renamed_from(repo, &commit, path)?
    && let Some(older) = introduction_of(repo, parent_id, &old_path, follow_budget - 1)?
  {
    return Ok(Some(older));
  }

  Ok(Some(commit))
}

/// If `commit` renamed some other path into `path`, returns the parent id
/// and the pre-rename path to continue the search from.
fn renamed_from(repo: &Repository, commit: &Commit<'_>, path: &Path) -> Result<Option<(Oid, PathBuf)>, git2::Error> {
  let Some(parent) = commit.parents().next() else {
    return Ok(None);
  };

  let mut diff = repo.diff_tree_to_tree(Some(&parent.tree()?), Some(&commit.tree()?), None)?;
  let mut find_opts = DiffFindOptions::new();
  find_opts.renames(true);
  diff.find_similar(Some(&mut find_opts))?;

  for delta in diff.deltas() {
    if delta.status() == Delta::Renamed
      && delta.new_file().path() == Some(path)
      && let Some(old_path) = delta.old_file().path()
    {
      return Ok(Some((parent.id(), old_path.to_path_buf())));
    }
  }

  Ok(None)
}

fn tree_contains(tree: &Tree<'_>, path: &Path) -> bool {
  tree.get_path(path).is_ok()
}

/// Calendar year of the commit's author date, in the author's local offset,
/// matching what `git log --date=format:%Y` reports.
fn commit_year(commit: &Commit<'_>) -> i32 {
  let when = commit.author().when();
  let local_seconds = when.seconds() + i64::from(when.offset_minutes()) * 60;
  DateTime::from_timestamp(local_seconds, 0).map_or(1970, |timestamp| timestamp.year())
}
