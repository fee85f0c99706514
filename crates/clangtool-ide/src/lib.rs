//! Query engine for C/C++ code intelligence.
//!
//! [`Engine`] is the facade editors talk to. It owns an [`Index`] and turns
//! cached parsed units into plain result values: AST trees, outlines,
//! diagnostics, completion candidates and source locations. No operation
//! returns an error; misses come back as empty values or
//! [`SourceLocation::none`].
//!
//! [`Index`]: clangtool_index::Index
//! [`SourceLocation::none`]: clangtool_core::SourceLocation::none

mod ast;
mod completion;
mod engine;
mod navigation;
mod outline;

pub use engine::{Engine, QueryOptions};
