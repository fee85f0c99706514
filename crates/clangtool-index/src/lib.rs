//! Argument store and translation-unit cache.
//!
//! [`Index`] owns one parsed unit per normalized path. Every (re)parse hands
//! the front end the current compiler arguments and every unsaved buffer.
//! Parse failures never escape: they become a handle-less entry carrying a
//! single fatal diagnostic.

mod args;
mod entry;
mod index;

pub use args::ArgumentStore;
pub use entry::{EntryState, IndexEntry};
pub use index::Index;
