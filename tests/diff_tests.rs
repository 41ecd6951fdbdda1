mod common;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use common::{git_add_and_commit, git_head, init_git_repo, is_git_available, run_git};
use spdxlint::diff::{self, ChangeStatus, ChangedFile};
use tempfile::{TempDir, tempdir};

/// Creates a repository with one committed file and returns the base commit.
fn repo_with_base() -> Result<(TempDir, String)> {
  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;

  fs::write(
    temp_dir.path().join("kept.py"),
    "# SPDX-FileCopyrightText: 2024 Co.\n# SPDX-License-Identifier: MIT\nprint('kept')\n",
  )?;
  git_add_and_commit(temp_dir.path(), "kept.py", "Initial commit")?;

  let base = git_head(temp_dir.path())?;
  Ok((temp_dir, base))
}

fn find<'a>(changed: &'a [ChangedFile], path: &str) -> &'a ChangedFile {
  changed
    .iter()
    .find(|file| file.path == PathBuf::from(path))
    .unwrap_or_else(|| panic!("{path} missing from change set"))
}

#[test]
fn test_classifies_added_modified_and_deleted() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let (temp_dir, base) = repo_with_base()?;

  fs::write(
    temp_dir.path().join("gone.py"),
    "# SPDX-FileCopyrightText: 2024 Co.\n# SPDX-License-Identifier: MIT\n",
  )?;
  git_add_and_commit(temp_dir.path(), "gone.py", "Add file that will be deleted")?;
  let base_with_gone = git_head(temp_dir.path())?;

  fs::write(temp_dir.path().join("fresh.py"), "print('fresh')\n")?;
  git_add_and_commit(temp_dir.path(), "fresh.py", "Add fresh file")?;

  fs::write(
    temp_dir.path().join("kept.py"),
    "# SPDX-FileCopyrightText: 2024 Co.\n# SPDX-License-Identifier: MIT\nprint('changed')\n",
  )?;
  git_add_and_commit(temp_dir.path(), "kept.py", "Modify kept file")?;

  run_git(temp_dir.path(), &["rm", "gone.py"])?;
  common::git_commit(temp_dir.path(), "Delete gone file")?;

  let changed = diff::list_changed_files(temp_dir.path(), &base_with_gone)?;
  assert_eq!(find(&changed, "fresh.py").status, ChangeStatus::Added);
  assert_eq!(find(&changed, "kept.py").status, ChangeStatus::Modified);
  assert_eq!(find(&changed, "gone.py").status, ChangeStatus::Deleted);

  // The earlier base does not know about gone.py at all.
  let changed_from_start = diff::list_changed_files(temp_dir.path(), &base)?;
  assert!(!changed_from_start.iter().any(|file| file.path == PathBuf::from("gone.py")));

  Ok(())
}

#[test]
fn test_detects_pure_rename_without_content_change() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let (temp_dir, base) = repo_with_base()?;

  run_git(temp_dir.path(), &["mv", "kept.py", "moved.py"])?;
  common::git_commit(temp_dir.path(), "Pure rename")?;

  let changed = diff::list_changed_files(temp_dir.path(), &base)?;
  let moved = find(&changed, "moved.py");
  assert_eq!(moved.status, ChangeStatus::Renamed);
  assert_eq!(moved.old_path, Some(PathBuf::from("kept.py")));
  assert!(!moved.content_changed);

  Ok(())
}

#[test]
fn test_rename_with_edit_marks_content_changed() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let (temp_dir, base) = repo_with_base()?;

  run_git(temp_dir.path(), &["mv", "kept.py", "moved.py"])?;
  fs::write(
    temp_dir.path().join("moved.py"),
    "# SPDX-FileCopyrightText: 2024 Co.\n# SPDX-License-Identifier: MIT\nprint('kept')\nprint('extra')\n",
  )?;
  run_git(temp_dir.path(), &["add", "moved.py"])?;
  common::git_commit(temp_dir.path(), "Rename and edit")?;

  let changed = diff::list_changed_files(temp_dir.path(), &base)?;
  let moved = find(&changed, "moved.py");
  assert_eq!(moved.status, ChangeStatus::Renamed);
  assert!(moved.content_changed);

  Ok(())
}

#[test]
fn test_change_set_is_sorted_by_path() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let (temp_dir, base) = repo_with_base()?;

  for name in ["zeta.py", "alpha.py", "mid.py"] {
    fs::write(temp_dir.path().join(name), "print()\n")?;
    git_add_and_commit(temp_dir.path(), name, &format!("Add {name}"))?;
  }

  let changed = diff::list_changed_files(temp_dir.path(), &base)?;
  let paths: Vec<_> = changed.iter().map(|file| file.path.clone()).collect();
  let mut sorted = paths.clone();
  sorted.sort();
  assert_eq!(paths, sorted);

  Ok(())
}

#[test]
fn test_unknown_base_reference_is_an_error() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let (temp_dir, _base) = repo_with_base()?;
  let result = diff::list_changed_files(temp_dir.path(), "origin/does-not-exist");
  assert!(result.is_err());

  Ok(())
}

#[test]
fn test_list_all_files_returns_tracked_files_as_modified() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let (temp_dir, _base) = repo_with_base()?;

  fs::write(temp_dir.path().join("second.py"), "print()\n")?;
  git_add_and_commit(temp_dir.path(), "second.py", "Add second file")?;
  // Untracked files are not part of an audit.
  fs::write(temp_dir.path().join("untracked.py"), "print()\n")?;

  let files = diff::list_all_files(temp_dir.path())?;
  let paths: Vec<_> = files.iter().map(|file| file.path.clone()).collect();
  assert!(paths.contains(&PathBuf::from("kept.py")));
  assert!(paths.contains(&PathBuf::from("second.py")));
  assert!(!paths.contains(&PathBuf::from("untracked.py")));
  assert!(files.iter().all(|file| file.status == ChangeStatus::Modified));

  Ok(())
}
