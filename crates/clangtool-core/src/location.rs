use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A 1-based `(row, col)` position inside a file.
///
/// A location whose `file` is empty is the "not found" sentinel returned by
/// navigation queries that do not resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub row: u32,
    pub col: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, row: u32, col: u32) -> Self {
        Self {
            file: file.into(),
            row,
            col,
        }
    }

    /// The "not found" sentinel.
    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.file.as_os_str().is_empty()
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("<none>");
        }
        write!(f, "{}:{}:{}", self.file.display(), self.row, self.col)
    }
}
