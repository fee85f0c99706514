use std::path::Path;

use clangtool_core::{AccessSpecifier, Diagnostic, SourceLocation};
use clangtool_memory::ResourceUsage;
use clangtool_vfs::UnsavedFile;

use crate::{CursorKind, FrontEndError};

/// Everything a front end needs to (re)parse one file.
#[derive(Debug, Clone, Copy)]
pub struct ParseRequest<'a> {
    pub path: &'a Path,
    pub args: &'a [String],
    /// Every active overlay, not only the one for `path`.
    pub unsaved: &'a [UnsavedFile<'a>],
}

impl<'a> ParseRequest<'a> {
    /// The overlay for the file being parsed, if any.
    pub fn unsaved_contents(&self) -> Option<&'a [u8]> {
        self.unsaved
            .iter()
            .find(|file| file.path == self.path)
            .map(|file| file.contents)
    }
}

/// Semantic payload of one cursor.
///
/// String fields are empty when the front end has nothing to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorInfo {
    pub kind: CursorKind,
    /// The bare identifier (`foo`).
    pub spelling: String,
    /// The name as displayed, including parameters for functions (`foo(int)`).
    pub display_name: String,
    pub ty: String,
    /// Underlying type for typedef declarations.
    pub typedef_type: String,
    /// Brief documentation comment.
    pub doc: String,
    pub access: AccessSpecifier,
    pub location: SourceLocation,
    pub in_main_file: bool,
    pub is_definition: bool,
}

impl CursorInfo {
    pub fn new(kind: CursorKind) -> Self {
        Self {
            kind,
            spelling: String::new(),
            display_name: String::new(),
            ty: String::new(),
            typedef_type: String::new(),
            doc: String::new(),
            access: AccessSpecifier::None,
            location: SourceLocation::none(),
            in_main_file: false,
            is_definition: false,
        }
    }
}

/// One completion result as the front end produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCompletion {
    pub kind: CursorKind,
    pub typed_text: String,
    pub result_type: String,
    /// Placeholder chunks, i.e. parameter signatures.
    pub placeholders: Vec<String>,
    pub brief: String,
    pub priority: u32,
    pub available: bool,
}

/// A C/C++ front end able to produce parsed units.
pub trait FrontEnd {
    type Unit: ParsedUnit;

    /// Parses `request.path` from scratch.
    fn parse(&self, request: &ParseRequest<'_>) -> Result<Self::Unit, FrontEndError>;

    /// Brings `unit` up to date with the current file contents.
    ///
    /// Implementations with an incremental strategy override this. On error
    /// the unit must be considered unusable and is dropped by the caller.
    fn reparse(
        &self,
        unit: &mut Self::Unit,
        request: &ParseRequest<'_>,
    ) -> Result<(), FrontEndError> {
        *unit = self.parse(request)?;
        Ok(())
    }
}

/// An owned handle to one parsed translation unit.
///
/// Dropping the handle releases everything the front end allocated for it.
pub trait ParsedUnit {
    /// A lightweight reference to one syntactic element, valid while the unit lives.
    type Cursor: Copy;

    /// The translation-unit cursor.
    fn root(&self) -> Self::Cursor;

    /// Direct children of `cursor` in source order.
    fn children(&self, cursor: Self::Cursor) -> Vec<Self::Cursor>;

    fn info(&self, cursor: Self::Cursor) -> CursorInfo;

    /// Diagnostics in emission order.
    fn diagnostics(&self) -> Vec<Diagnostic>;

    /// The cursor at a 1-based position, or `None` when nothing resolves there
    /// (including positions outside the file).
    fn cursor_at(&self, path: &Path, row: u32, col: u32) -> Option<Self::Cursor>;

    /// The entity `cursor` refers to; declarations refer to themselves.
    fn referenced(&self, cursor: Self::Cursor) -> Option<Self::Cursor>;

    /// The defining entity for `cursor`, when one is visible.
    fn definition(&self, cursor: Self::Cursor) -> Option<Self::Cursor>;

    /// Completion results at a 1-based position, in the front end's order.
    fn complete_at(
        &mut self,
        path: &Path,
        row: u32,
        col: u32,
        unsaved: &[UnsavedFile<'_>],
    ) -> Vec<RawCompletion>;

    fn resource_usage(&self) -> ResourceUsage;
}
