//! The seam between the query engine and a C/C++ front end.
//!
//! The engine never parses anything itself. It hands a [`ParseRequest`] to a
//! [`FrontEnd`], keeps the resulting [`ParsedUnit`], and reads cursors, types,
//! diagnostics and completions back through the trait. The production
//! implementation lives in `clangtool-clang`; tests use a scripted one.

mod error;
mod kind;
mod unit;

pub use clangtool_vfs::UnsavedFile;
pub use error::FrontEndError;
pub use kind::CursorKind;
pub use unit::{CursorInfo, FrontEnd, ParseRequest, ParsedUnit, RawCompletion};
