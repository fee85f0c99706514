//! Core shared types for clangtool.
//!
//! Everything the query layer hands back to callers lives here, so adapters
//! (the CLI, editor bindings) only need this crate to render results.

mod ast;
mod completion;
mod diagnostic;
mod location;
mod outline;
mod text;

pub use ast::{AccessSpecifier, AstNode, Descendants};
pub use completion::{CompletionCandidate, CompletionKind};
pub use diagnostic::{Diagnostic, Severity};
pub use location::SourceLocation;
pub use outline::{Outline, OutlineClass, OutlineFunction};
pub use text::{LineCol, LineIndex, TextSize};
