use std::path::Path;

use clangtool_core::SourceLocation;
use clangtool_frontend::ParsedUnit;

/// Type under the position, falling back to the referenced entity's type.
pub(crate) fn type_at<U: ParsedUnit>(unit: &U, path: &Path, row: u32, col: u32) -> String {
    let Some(cursor) = unit.cursor_at(path, row, col) else {
        return String::new();
    };
    let ty = unit.info(cursor).ty;
    if !ty.is_empty() {
        return ty;
    }
    unit.referenced(cursor)
        .map(|target| unit.info(target).ty)
        .unwrap_or_default()
}

pub(crate) fn declaration_at<U: ParsedUnit>(
    unit: &U,
    path: &Path,
    row: u32,
    col: u32,
) -> SourceLocation {
    unit.cursor_at(path, row, col)
        .and_then(|cursor| unit.referenced(cursor))
        .map(|target| unit.info(target).location)
        .unwrap_or_else(SourceLocation::none)
}

/// Definition of the cursor itself, or failing that of what it refers to.
pub(crate) fn definition_at<U: ParsedUnit>(
    unit: &U,
    path: &Path,
    row: u32,
    col: u32,
) -> SourceLocation {
    unit.cursor_at(path, row, col)
        .and_then(|cursor| {
            unit.definition(cursor).or_else(|| {
                unit.referenced(cursor)
                    .and_then(|target| unit.definition(target))
            })
        })
        .map(|target| unit.info(target).location)
        .unwrap_or_else(SourceLocation::none)
}
