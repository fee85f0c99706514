//! Small owning helpers around libclang's C types.

use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::os::raw::{c_char, c_uint};
use std::path::Path;
use std::ptr;

use clang_sys as cx;
use clangtool_core::SourceLocation;
use clangtool_frontend::{FrontEndError, UnsavedFile};

/// Takes ownership of a `CXString` and copies it out.
pub(crate) fn take_string(s: cx::CXString) -> String {
    // SAFETY: `s` was just returned by libclang and is disposed exactly once here.
    unsafe {
        let raw = cx::clang_getCString(s);
        let out = if raw.is_null() {
            String::new()
        } else {
            CStr::from_ptr(raw).to_string_lossy().into_owned()
        };
        cx::clang_disposeString(s);
        out
    }
}

pub(crate) fn path_to_cstring(path: &Path) -> Result<CString, FrontEndError> {
    let invalid = || FrontEndError::InvalidPath {
        path: path.to_path_buf(),
    };

    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path.to_str().ok_or_else(invalid)?.as_bytes().to_vec();

    CString::new(bytes).map_err(|_| invalid())
}

/// Spelling location of `loc`, or the sentinel when it has no file.
pub(crate) fn location(loc: cx::CXSourceLocation) -> SourceLocation {
    let mut file: cx::CXFile = ptr::null_mut();
    let mut line: c_uint = 0;
    let mut column: c_uint = 0;
    let mut offset: c_uint = 0;
    // SAFETY: all out-pointers are valid for writes.
    unsafe {
        cx::clang_getSpellingLocation(loc, &mut file, &mut line, &mut column, &mut offset);
    }
    if file.is_null() {
        return SourceLocation::none();
    }
    // SAFETY: `file` is a live file handle owned by the translation unit.
    let name = take_string(unsafe { cx::clang_getFileName(file) });
    if name.is_empty() {
        return SourceLocation::none();
    }
    SourceLocation::new(
        clangtool_vfs::normalize_local_path(Path::new(&name)),
        line,
        column,
    )
}

/// C views of unsaved buffers, valid while the borrowed buffers are.
pub(crate) struct CxUnsaved<'a> {
    _names: Vec<CString>,
    files: Vec<cx::CXUnsavedFile>,
    _contents: PhantomData<&'a [u8]>,
}

impl<'a> CxUnsaved<'a> {
    pub(crate) fn new(unsaved: &[UnsavedFile<'a>]) -> Result<Self, FrontEndError> {
        let names = unsaved
            .iter()
            .map(|file| path_to_cstring(file.path))
            .collect::<Result<Vec<_>, _>>()?;
        let files = names
            .iter()
            .zip(unsaved)
            .map(|(name, file)| cx::CXUnsavedFile {
                Filename: name.as_ptr(),
                Contents: file.contents.as_ptr() as *const c_char,
                Length: file.contents.len() as _,
            })
            .collect();
        Ok(Self {
            _names: names,
            files,
            _contents: PhantomData,
        })
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut cx::CXUnsavedFile {
        if self.files.is_empty() {
            ptr::null_mut()
        } else {
            self.files.as_mut_ptr()
        }
    }

    pub(crate) fn len(&self) -> c_uint {
        self.files.len() as c_uint
    }
}

/// Owned argument vector with the pointer array libclang expects.
pub(crate) struct CxArgs {
    _args: Vec<CString>,
    ptrs: Vec<*const c_char>,
}

impl CxArgs {
    pub(crate) fn new(args: &[String]) -> Result<Self, FrontEndError> {
        let owned = args
            .iter()
            .map(|arg| {
                CString::new(arg.as_bytes())
                    .map_err(|_| FrontEndError::InvalidArgument(arg.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let ptrs = owned.iter().map(|arg| arg.as_ptr()).collect();
        Ok(Self { _args: owned, ptrs })
    }

    pub(crate) fn as_ptr(&self) -> *const *const c_char {
        if self.ptrs.is_empty() {
            ptr::null()
        } else {
            self.ptrs.as_ptr()
        }
    }

    pub(crate) fn len(&self) -> i32 {
        self.ptrs.len() as i32
    }
}
