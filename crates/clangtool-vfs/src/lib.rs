//! Virtual file layer for clangtool.
//!
//! The VFS is responsible for:
//! - Holding editor buffers (unsaved content) that take precedence over disk
//!   whenever a translation unit is parsed.
//! - Normalizing caller-supplied paths so every file has exactly one key.

mod overlay;
mod path;

pub use overlay::{UnsavedBuffers, UnsavedFile};
pub use path::{normalize_local_path, normalize_path};
