use std::os::raw::c_uint;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::slice;

use clang_sys as cx;
use clangtool_core::{Diagnostic, LineIndex};
use clangtool_frontend::{CursorInfo, CursorKind, ParsedUnit, RawCompletion, UnsavedFile};
use clangtool_memory::ResourceUsage;

use crate::convert;
use crate::cx::{location, path_to_cstring, take_string, CxUnsaved};
use crate::front_end::IndexHandle;
use crate::library::Library;

/// A libclang cursor. Only meaningful together with the unit it came from.
#[derive(Debug, Clone, Copy)]
pub struct ClangCursor(cx::CXCursor);

/// An owned `CXTranslationUnit`.
///
/// Dropping the unit disposes the translation unit; the shared index is
/// released once the last unit created from it is gone.
pub struct ClangUnit {
    tu: cx::CXTranslationUnit,
    path: PathBuf,
    library: Library,
    completion_flags: cx::CXCodeComplete_Flags,
    _index: Rc<IndexHandle>,
}

impl std::fmt::Debug for ClangUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClangUnit").field("path", &self.path).finish()
    }
}

impl ClangUnit {
    pub(crate) fn new(
        tu: cx::CXTranslationUnit,
        path: PathBuf,
        index: Rc<IndexHandle>,
        library: Library,
        completion_flags: cx::CXCodeComplete_Flags,
    ) -> Self {
        Self {
            tu,
            path,
            library,
            completion_flags,
            _index: index,
        }
    }

    pub(crate) fn raw(&self) -> cx::CXTranslationUnit {
        self.tu
    }

    /// The main file this unit was parsed from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&self, path: &Path) -> Option<cx::CXFile> {
        let name = path_to_cstring(path).ok()?;
        // SAFETY: `tu` is live and `name` outlives the call.
        let file = unsafe { cx::clang_getFile(self.tu, name.as_ptr()) };
        (!file.is_null()).then_some(file)
    }

    /// Whether the 1-based position lies inside the parsed contents of `file`.
    fn in_bounds(&self, file: cx::CXFile, row: u32, col: u32) -> bool {
        let mut size: usize = 0;
        // SAFETY: the returned buffer is owned by the translation unit and
        // valid while it lives; we only read `size` bytes from it.
        let contents = unsafe {
            let data = cx::clang_getFileContents(self.tu, file, &mut size);
            if data.is_null() {
                return false;
            }
            slice::from_raw_parts(data as *const u8, size)
        };
        LineIndex::new(contents).contains(row, col)
    }
}

impl Drop for ClangUnit {
    fn drop(&mut self) {
        self.library.activate();
        // SAFETY: `tu` is owned by this unit and disposed exactly once.
        unsafe { cx::clang_disposeTranslationUnit(self.tu) };
    }
}

extern "C" fn collect_children(
    cursor: cx::CXCursor,
    _parent: cx::CXCursor,
    data: cx::CXClientData,
) -> cx::CXChildVisitResult {
    // SAFETY: `data` is the `Vec` passed by `children` below.
    let out = unsafe { &mut *(data as *mut Vec<ClangCursor>) };
    out.push(ClangCursor(cursor));
    cx::CXChildVisit_Continue
}

fn is_usable(cursor: cx::CXCursor) -> bool {
    // SAFETY: pure queries on a by-value cursor.
    unsafe { cx::clang_Cursor_isNull(cursor) == 0 && cx::clang_isInvalid(cursor.kind) == 0 }
}

fn type_spelling(ty: cx::CXType) -> String {
    if ty.kind == cx::CXType_Invalid {
        return String::new();
    }
    // SAFETY: `ty` is a valid type handle.
    take_string(unsafe { cx::clang_getTypeSpelling(ty) })
}

impl ParsedUnit for ClangUnit {
    type Cursor = ClangCursor;

    fn root(&self) -> ClangCursor {
        self.library.activate();
        // SAFETY: `tu` is live.
        ClangCursor(unsafe { cx::clang_getTranslationUnitCursor(self.tu) })
    }

    fn children(&self, cursor: ClangCursor) -> Vec<ClangCursor> {
        self.library.activate();
        let mut out: Vec<ClangCursor> = Vec::new();
        // SAFETY: the visitor only pushes into `out`, which outlives the call.
        unsafe {
            cx::clang_visitChildren(
                cursor.0,
                collect_children,
                &mut out as *mut Vec<ClangCursor> as cx::CXClientData,
            );
        }
        out
    }

    fn info(&self, cursor: ClangCursor) -> CursorInfo {
        self.library.activate();
        let c = cursor.0;
        // SAFETY: `c` belongs to this live unit.
        unsafe {
            let kind = convert::cursor_kind(cx::clang_getCursorKind(c));
            let loc = cx::clang_getCursorLocation(c);
            let typedef_type = match kind {
                CursorKind::TypedefDecl | CursorKind::TypeAliasDecl => {
                    type_spelling(cx::clang_getTypedefDeclUnderlyingType(c))
                }
                _ => String::new(),
            };

            CursorInfo {
                kind,
                spelling: take_string(cx::clang_getCursorSpelling(c)),
                display_name: take_string(cx::clang_getCursorDisplayName(c)),
                ty: type_spelling(cx::clang_getCursorType(c)),
                typedef_type,
                doc: take_string(cx::clang_Cursor_getBriefCommentText(c)),
                access: convert::access(cx::clang_getCXXAccessSpecifier(c)),
                location: location(loc),
                in_main_file: cx::clang_Location_isFromMainFile(loc) != 0,
                is_definition: cx::clang_isCursorDefinition(c) != 0,
            }
        }
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        self.library.activate();
        // SAFETY: each diagnostic is disposed after its strings are copied out.
        unsafe {
            let count = cx::clang_getNumDiagnostics(self.tu);
            let display = cx::clang_defaultDiagnosticDisplayOptions();
            let mut out = Vec::with_capacity(count as usize);
            for i in 0..count {
                let diag = cx::clang_getDiagnostic(self.tu, i);
                if diag.is_null() {
                    continue;
                }
                if let Some(severity) = convert::severity(cx::clang_getDiagnosticSeverity(diag)) {
                    out.push(Diagnostic::new(
                        location(cx::clang_getDiagnosticLocation(diag)),
                        severity,
                        take_string(cx::clang_formatDiagnostic(diag, display)),
                        take_string(cx::clang_getDiagnosticSpelling(diag)),
                    ));
                }
                cx::clang_disposeDiagnostic(diag);
            }
            out
        }
    }

    fn cursor_at(&self, path: &Path, row: u32, col: u32) -> Option<ClangCursor> {
        self.library.activate();
        let file = self.file(path)?;
        if !self.in_bounds(file, row, col) {
            return None;
        }
        // SAFETY: `file` belongs to this unit and the position is in bounds.
        let cursor = unsafe {
            let loc = cx::clang_getLocation(self.tu, file, row as c_uint, col as c_uint);
            cx::clang_getCursor(self.tu, loc)
        };
        if !is_usable(cursor) || cursor.kind == cx::CXCursor_TranslationUnit {
            return None;
        }
        Some(ClangCursor(cursor))
    }

    fn referenced(&self, cursor: ClangCursor) -> Option<ClangCursor> {
        self.library.activate();
        // SAFETY: `cursor` belongs to this live unit.
        let referenced = unsafe { cx::clang_getCursorReferenced(cursor.0) };
        is_usable(referenced).then_some(ClangCursor(referenced))
    }

    fn definition(&self, cursor: ClangCursor) -> Option<ClangCursor> {
        self.library.activate();
        // SAFETY: `cursor` belongs to this live unit.
        let definition = unsafe { cx::clang_getCursorDefinition(cursor.0) };
        is_usable(definition).then_some(ClangCursor(definition))
    }

    fn complete_at(
        &mut self,
        path: &Path,
        row: u32,
        col: u32,
        unsaved: &[UnsavedFile<'_>],
    ) -> Vec<RawCompletion> {
        self.library.activate();
        match self.file(path) {
            Some(file) if self.in_bounds(file, row, col) => {}
            _ => return Vec::new(),
        }
        let Ok(name) = path_to_cstring(path) else {
            return Vec::new();
        };
        let Ok(mut unsaved) = CxUnsaved::new(unsaved) else {
            return Vec::new();
        };

        // SAFETY: all pointers outlive the call; results are disposed below.
        unsafe {
            let results = cx::clang_codeCompleteAt(
                self.tu,
                name.as_ptr(),
                row as c_uint,
                col as c_uint,
                unsaved.as_mut_ptr(),
                unsaved.len(),
                self.completion_flags as _,
            );
            if results.is_null() {
                tracing::debug!(
                    target: "clangtool.clang",
                    path = %path.display(),
                    row,
                    col,
                    "code completion returned nothing"
                );
                return Vec::new();
            }

            let raw = &*results;
            let items = if raw.Results.is_null() {
                &[][..]
            } else {
                slice::from_raw_parts(raw.Results, raw.NumResults as usize)
            };
            let out = items.iter().map(|item| completion(item)).collect();
            cx::clang_disposeCodeCompleteResults(results);
            out
        }
    }

    fn resource_usage(&self) -> ResourceUsage {
        self.library.activate();
        let mut usage = ResourceUsage::new();
        // SAFETY: the usage block is read and then disposed exactly once.
        unsafe {
            let raw = cx::clang_getCXTUResourceUsage(self.tu);
            if !raw.entries.is_null() {
                for entry in slice::from_raw_parts(raw.entries, raw.numEntries as usize) {
                    usage.add(convert::resource_kind(entry.kind), entry.amount as u64);
                }
            }
            cx::clang_disposeCXTUResourceUsage(raw);
        }
        usage
    }
}

/// Reads one completion string.
///
/// # Safety
/// `item` must come from live completion results.
unsafe fn completion(item: &cx::CXCompletionResult) -> RawCompletion {
    let string = item.CompletionString;
    let mut typed_text = String::new();
    let mut result_type = String::new();
    let mut placeholders = Vec::new();

    for i in 0..cx::clang_getNumCompletionChunks(string) {
        match cx::clang_getCompletionChunkKind(string, i) {
            cx::CXCompletionChunk_TypedText => {
                typed_text = take_string(cx::clang_getCompletionChunkText(string, i));
            }
            cx::CXCompletionChunk_ResultType => {
                result_type = take_string(cx::clang_getCompletionChunkText(string, i));
            }
            cx::CXCompletionChunk_Placeholder | cx::CXCompletionChunk_CurrentParameter => {
                placeholders.push(take_string(cx::clang_getCompletionChunkText(string, i)));
            }
            _ => {}
        }
    }

    RawCompletion {
        kind: convert::cursor_kind(item.CursorKind),
        typed_text,
        result_type,
        placeholders,
        brief: take_string(cx::clang_getCompletionBriefComment(string)),
        priority: cx::clang_getCompletionPriority(string),
        available: cx::clang_getCompletionAvailability(string) != cx::CXAvailability_NotAvailable,
    }
}
