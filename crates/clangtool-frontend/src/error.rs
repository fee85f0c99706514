use std::path::PathBuf;

/// Failures reported by a front end.
///
/// The index turns parse-time failures into diagnostics; these errors only
/// escape to callers when a front end cannot be constructed at all.
#[derive(Debug, thiserror::Error)]
pub enum FrontEndError {
    #[error("front end library unavailable: {0}")]
    LibraryUnavailable(String),

    #[error("path {path:?} cannot be passed to the front end")]
    InvalidPath { path: PathBuf },

    #[error("argument {0:?} contains an interior NUL byte")]
    InvalidArgument(String),

    #[error("failed to parse {path:?} (error code {code})")]
    ParseFailed { path: PathBuf, code: i32 },

    #[error("failed to reparse {path:?} (error code {code})")]
    ReparseFailed { path: PathBuf, code: i32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
