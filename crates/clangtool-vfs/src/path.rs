use std::path::{Component, Path, PathBuf};

/// Normalizes a caller-supplied path into the key used by the overlay and the
/// translation-unit index.
///
/// Relative paths are resolved against the process working directory, then the
/// result is lexically normalized (see [`normalize_local_path`]). Symlinks are
/// not resolved and the filesystem is not touched beyond reading the working
/// directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_local_path(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize_local_path(&cwd.join(path)),
        Err(err) => {
            tracing::debug!(
                target: "clangtool.vfs",
                path = %path.display(),
                error = %err,
                "failed to read working directory; keeping relative path"
            );
            normalize_local_path(path)
        }
    }
}

/// Lexically normalizes a local filesystem path.
///
/// `.` components are dropped and `..` pops the previous normal component.
/// Leading `..` components survive on relative paths and are dropped at the
/// root of absolute paths.
pub fn normalize_local_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    // Normal components currently in `out`; only those may be popped.
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir if depth > 0 => {
                out.pop();
                depth -= 1;
            }
            Component::ParentDir if out.has_root() => {}
            Component::ParentDir => out.push(".."),
            Component::Normal(segment) => {
                out.push(segment);
                depth += 1;
            }
        }
    }
    out
}
