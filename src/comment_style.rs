//! # Comment Style Module
//!
//! Fixed mapping from file extensions to the comment-prefix family used for
//! SPDX header lines. The table is deliberately not configurable: the set of
//! supported syntaxes is part of the validation contract, and letting a
//! filter or config layer override it would make verdicts depend on caller
//! configuration.

use std::fmt;
use std::path::Path;

/// Comment-prefix family a file type uses for its SPDX header lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentFamily {
  /// `//` line comments (C, C++, Java, Rust, Go, ...)
  Slashes,
  /// `#` line comments (Python, shell, CMake, Ruby, ...)
  Hash,
}

impl CommentFamily {
  /// The literal prefix written at the start of a header line.
  pub const fn prefix(self) -> &'static str {
    match self {
      CommentFamily::Slashes => "//",
      CommentFamily::Hash => "#",
    }
  }

  /// Maps a raw prefix as found in a file back to its family.
  pub fn from_prefix(prefix: &str) -> Option<Self> {
    match prefix {
      "//" => Some(CommentFamily::Slashes),
      "#" => Some(CommentFamily::Hash),
      _ => None,
    }
  }
}

impl fmt::Display for CommentFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.prefix())
  }
}

/// Returns the comment family expected for a file, or `None` when the
/// extension is not in the supported set (such files are skipped, never
/// flagged).
pub fn family_for_path(path: &Path) -> Option<CommentFamily> {
  let ext = path.extension()?.to_str()?.to_ascii_lowercase();
  match ext.as_str() {
    "c" | "cc" | "cpp" | "cxx" | "h" | "hh" | "hpp" | "java" | "rs" | "go" | "js" | "jsx" | "ts" | "tsx" | "kt"
    | "swift" | "scala" | "cs" => Some(CommentFamily::Slashes),
    "py" | "sh" | "bash" | "zsh" | "cmake" | "rb" | "pl" | "pm" | "mk" | "tcl" | "ps1" | "yaml" | "yml" => {
      Some(CommentFamily::Hash)
    }
    _ => None,
  }
}
