//! libclang implementation of the clangtool front-end seam.
//!
//! libclang is loaded at runtime (`clang-sys/runtime`). [`ClangFrontEnd::load`]
//! fails with [`FrontEndError::LibraryUnavailable`] when no shared library can
//! be found; set `LIBCLANG_PATH` (or [`ClangOptions::libclang_path`]) to point
//! at a specific installation.
//!
//! Handles are raw libclang pointers, so neither the front end nor its units
//! are `Send`. Use them from the thread that created them.
//!
//! [`FrontEndError::LibraryUnavailable`]: clangtool_frontend::FrontEndError::LibraryUnavailable

mod convert;
mod cx;
mod front_end;
mod library;
mod unit;

pub use front_end::{ClangFrontEnd, ClangOptions};
pub use library::libclang_available;
pub use unit::{ClangCursor, ClangUnit};
