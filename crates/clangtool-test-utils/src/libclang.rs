//! Helpers for tests that drive the real libclang front end.

use std::sync::OnceLock;

use clangtool_clang::{ClangFrontEnd, ClangOptions};

/// Whether libclang can be loaded. Probed once per test binary.
pub fn libclang_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| {
        let available = clangtool_clang::libclang_available();
        if !available {
            tracing::debug!(target: "clangtool.test", "libclang not found");
        }
        available
    })
}

/// A front end with default options, or `None` when libclang is missing.
pub fn clang_front_end() -> Option<ClangFrontEnd> {
    if !libclang_available() {
        return None;
    }
    ClangFrontEnd::load(ClangOptions::default()).ok()
}
