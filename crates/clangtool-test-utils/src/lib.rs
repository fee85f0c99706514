//! Utilities shared by clangtool tests.
//!
//! - [`FakeFrontEnd`] is a scripted, in-memory implementation of the
//!   front-end seam. Index and engine tests use it so they run without
//!   libclang and can inspect every parse the engine asked for.
//! - [`Fixture`] writes source files into a temporary directory.
//! - With the `libclang` feature, [`libclang`] offers an availability probe so
//!   tests against the real front end can skip on machines without it.

mod fake;
mod fixtures;

#[cfg(feature = "libclang")]
pub mod libclang;

pub use fake::{
    CompletionRecord, FakeCursor, FakeFrontEnd, FakeNode, FakeOutput, FakeSource, FakeUnit, ParseKind,
    ParseRecord,
};
pub use fixtures::Fixture;
