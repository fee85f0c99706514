use std::path::Path;
use std::sync::Arc;

use clang_sys::SharedLibrary;
use clangtool_frontend::FrontEndError;

/// A loaded libclang, shareable across the handles that call into it.
///
/// `clang-sys` keeps the active library in a thread local. Every entry point
/// that calls libclang goes through [`Library::activate`] first so handles
/// keep working if the engine is driven from a different thread than the one
/// that loaded it.
#[derive(Clone)]
pub(crate) struct Library {
    shared: Arc<SharedLibrary>,
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("path", &self.shared.path())
            .finish()
    }
}

impl Library {
    pub(crate) fn load(search_path: Option<&Path>) -> Result<Self, FrontEndError> {
        if let Some(path) = search_path {
            std::env::set_var("LIBCLANG_PATH", path);
        }

        if !clang_sys::is_loaded() {
            clang_sys::load().map_err(FrontEndError::LibraryUnavailable)?;
        }

        let shared = clang_sys::get_library().ok_or_else(|| {
            FrontEndError::LibraryUnavailable("libclang loaded but not registered".to_string())
        })?;

        tracing::debug!(
            target: "clangtool.clang",
            path = %shared.path().display(),
            "libclang loaded"
        );
        Ok(Self { shared })
    }

    #[inline]
    pub(crate) fn activate(&self) {
        if !clang_sys::is_loaded() {
            clang_sys::set_library(Some(self.shared.clone()));
        }
    }
}

/// Whether a libclang shared library can be loaded on this machine.
pub fn libclang_available() -> bool {
    Library::load(None).is_ok()
}
