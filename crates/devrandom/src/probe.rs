// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Capability probes run against a device path before it is opened.

use std::path::Path;

#[cfg(unix)]
fn access(path: &Path, mode: libc::c_int) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };

    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}

/// Returns `true` if the current process may read `path`.
#[cfg(unix)]
pub(crate) fn is_readable(path: &Path) -> bool {
    access(path, libc::R_OK)
}

/// Returns `true` if the current process may write `path`.
#[cfg(unix)]
pub(crate) fn is_writable(path: &Path) -> bool {
    access(path, libc::W_OK)
}

#[cfg(not(unix))]
pub(crate) fn is_readable(path: &Path) -> bool {
    std::fs::File::open(path).is_ok()
}

#[cfg(not(unix))]
pub(crate) fn is_writable(path: &Path) -> bool {
    std::fs::OpenOptions::new().write(true).open(path).is_ok()
}

/// A path is usable as a device iff it is absolute, exists and is readable.
pub(crate) fn is_usable_device(path: &Path) -> bool {
    path.is_absolute() && path.exists() && is_readable(path)
}
