use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A borrowed view of one unsaved buffer, in the shape the front end consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsavedFile<'a> {
    pub path: &'a Path,
    pub contents: &'a [u8],
}

/// In-memory editor buffers that take precedence over disk content.
///
/// Keys are expected to be normalized already (see [`crate::normalize_path`]).
/// A buffer stays authoritative for its path until it is replaced or
/// discarded; the overlay never expires entries on its own.
#[derive(Debug, Clone, Default)]
pub struct UnsavedBuffers {
    buffers: BTreeMap<PathBuf, Vec<u8>>,
}

impl UnsavedBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or overwrites) the unsaved content for `path`.
    ///
    /// Only the first `length` bytes of `content` are kept; a `length` larger
    /// than the content keeps all of it. The bytes are copied, so the caller's
    /// storage may be released as soon as this returns.
    pub fn set(&mut self, path: impl Into<PathBuf>, content: &[u8], length: usize) {
        let path = path.into();
        let length = length.min(content.len());
        tracing::trace!(
            target: "clangtool.vfs",
            path = %path.display(),
            bytes = length,
            "unsaved buffer updated"
        );
        self.buffers.insert(path, content[..length].to_vec());
    }

    /// Drops the unsaved content for `path`. Returns whether a buffer existed.
    pub fn discard(&mut self, path: &Path) -> bool {
        let removed = self.buffers.remove(path).is_some();
        if removed {
            tracing::trace!(
                target: "clangtool.vfs",
                path = %path.display(),
                "unsaved buffer discarded"
            );
        }
        removed
    }

    pub fn clear(&mut self) {
        self.buffers.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.buffers.contains_key(path)
    }

    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.buffers.get(path).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Every buffer, ordered by path.
    pub fn unsaved_files(&self) -> Vec<UnsavedFile<'_>> {
        self.buffers
            .iter()
            .map(|(path, contents)| UnsavedFile {
                path: path.as_path(),
                contents: contents.as_slice(),
            })
            .collect()
    }

    /// Total bytes held by all buffers.
    pub fn total_bytes(&self) -> u64 {
        self.buffers.values().map(|b| b.len() as u64).sum()
    }
}
