use std::path::PathBuf;
use std::ptr;
use std::rc::Rc;
use std::time::Instant;

use clang_sys as cx;
use clangtool_frontend::{FrontEnd, FrontEndError, ParseRequest};

use crate::cx::{path_to_cstring, CxArgs, CxUnsaved};
use crate::library::Library;
use crate::unit::ClangUnit;

/// Knobs forwarded to libclang when parsing and completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClangOptions {
    /// Directory (or file) to load libclang from. Exported as `LIBCLANG_PATH`.
    pub libclang_path: Option<PathBuf>,
    /// Keep inclusion directives and macro definitions in the AST.
    pub detailed_preprocessing_record: bool,
    pub precompiled_preamble: bool,
    /// Attach brief documentation comments to completion results.
    pub brief_comments: bool,
    pub include_macros: bool,
    pub include_code_patterns: bool,
}

impl Default for ClangOptions {
    fn default() -> Self {
        Self {
            libclang_path: None,
            detailed_preprocessing_record: true,
            precompiled_preamble: true,
            brief_comments: true,
            include_macros: false,
            include_code_patterns: false,
        }
    }
}

impl ClangOptions {
    pub(crate) fn parse_flags(&self) -> cx::CXTranslationUnit_Flags {
        let mut flags = cx::CXTranslationUnit_CacheCompletionResults;
        if self.detailed_preprocessing_record {
            flags |= cx::CXTranslationUnit_DetailedPreprocessingRecord;
        }
        if self.precompiled_preamble {
            flags |= cx::CXTranslationUnit_PrecompiledPreamble;
        }
        if self.brief_comments {
            flags |= cx::CXTranslationUnit_IncludeBriefCommentsInCodeCompletion;
        }
        flags
    }

    pub(crate) fn completion_flags(&self) -> cx::CXCodeComplete_Flags {
        let mut flags = 0;
        if self.include_macros {
            flags |= cx::CXCodeComplete_IncludeMacros;
        }
        if self.include_code_patterns {
            flags |= cx::CXCodeComplete_IncludeCodePatterns;
        }
        if self.brief_comments {
            flags |= cx::CXCodeComplete_IncludeBriefComments;
        }
        flags
    }
}

/// Owns a `CXIndex`. Units keep it alive through an `Rc`.
pub(crate) struct IndexHandle {
    raw: cx::CXIndex,
    library: Library,
}

impl IndexHandle {
    pub(crate) fn raw(&self) -> cx::CXIndex {
        self.raw
    }
}

impl Drop for IndexHandle {
    fn drop(&mut self) {
        self.library.activate();
        // SAFETY: `raw` came from `clang_createIndex` and every unit created
        // from it holds an `Rc` to this handle, so none outlive it.
        unsafe { cx::clang_disposeIndex(self.raw) };
    }
}

/// A front end backed by libclang.
pub struct ClangFrontEnd {
    index: Rc<IndexHandle>,
    library: Library,
    options: ClangOptions,
}

impl std::fmt::Debug for ClangFrontEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClangFrontEnd")
            .field("library", &self.library)
            .field("options", &self.options)
            .finish()
    }
}

impl ClangFrontEnd {
    /// Loads libclang and creates a fresh index.
    pub fn load(options: ClangOptions) -> Result<Self, FrontEndError> {
        let library = Library::load(options.libclang_path.as_deref())?;
        library.activate();

        // SAFETY: plain constructor; a null result is handled below.
        let raw = unsafe { cx::clang_createIndex(0, 0) };
        if raw.is_null() {
            return Err(FrontEndError::LibraryUnavailable(
                "clang_createIndex returned null".to_string(),
            ));
        }

        Ok(Self {
            index: Rc::new(IndexHandle {
                raw,
                library: library.clone(),
            }),
            library,
            options,
        })
    }

    pub fn options(&self) -> &ClangOptions {
        &self.options
    }
}

impl FrontEnd for ClangFrontEnd {
    type Unit = ClangUnit;

    fn parse(&self, request: &ParseRequest<'_>) -> Result<ClangUnit, FrontEndError> {
        self.library.activate();
        let started = Instant::now();

        let filename = path_to_cstring(request.path)?;
        let args = CxArgs::new(request.args)?;
        let mut unsaved = CxUnsaved::new(request.unsaved)?;
        let mut tu: cx::CXTranslationUnit = ptr::null_mut();

        // SAFETY: every pointer handed over stays alive for the duration of
        // the call; libclang copies what it keeps.
        let code = unsafe {
            cx::clang_parseTranslationUnit2(
                self.index.raw(),
                filename.as_ptr(),
                args.as_ptr(),
                args.len(),
                unsaved.as_mut_ptr(),
                unsaved.len(),
                self.options.parse_flags(),
                &mut tu,
            )
        };

        if code != cx::CXError_Success || tu.is_null() {
            tracing::debug!(
                target: "clangtool.clang",
                path = %request.path.display(),
                code,
                "libclang parse failed"
            );
            if !tu.is_null() {
                // SAFETY: libclang handed us ownership even on failure.
                unsafe { cx::clang_disposeTranslationUnit(tu) };
            }
            return Err(FrontEndError::ParseFailed {
                path: request.path.to_path_buf(),
                code: code as i32,
            });
        }

        tracing::trace!(
            target: "clangtool.clang",
            path = %request.path.display(),
            unsaved = request.unsaved.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "parsed translation unit"
        );

        Ok(ClangUnit::new(
            tu,
            request.path.to_path_buf(),
            Rc::clone(&self.index),
            self.library.clone(),
            self.options.completion_flags(),
        ))
    }

    fn reparse(
        &self,
        unit: &mut ClangUnit,
        request: &ParseRequest<'_>,
    ) -> Result<(), FrontEndError> {
        self.library.activate();
        let mut unsaved = CxUnsaved::new(request.unsaved)?;

        // SAFETY: `unit` owns a live translation unit; `unsaved` outlives the call.
        let code = unsafe {
            let flags = cx::clang_defaultReparseOptions(unit.raw());
            cx::clang_reparseTranslationUnit(unit.raw(), unsaved.len(), unsaved.as_mut_ptr(), flags)
        };

        if code != 0 {
            tracing::debug!(
                target: "clangtool.clang",
                path = %request.path.display(),
                code,
                "libclang reparse failed"
            );
            return Err(FrontEndError::ReparseFailed {
                path: request.path.to_path_buf(),
                code: code as i32,
            });
        }
        Ok(())
    }
}
