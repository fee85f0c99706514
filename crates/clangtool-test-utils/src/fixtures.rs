use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary source tree. Removed when dropped.
#[derive(Debug)]
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create fixture dir");
        Self { dir }
    }

    /// Builds a tree from `(relative path, contents)` pairs.
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let fixture = Self::new();
        for (rel, text) in files {
            fixture.write(rel, text);
        }
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` inside the fixture, whether it exists or not.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Writes `text` to `rel`, creating parent directories. Returns the absolute path.
    pub fn write(&self, rel: &str, text: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parent");
        }
        fs::write(&path, text).expect("write fixture file");
        path
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
