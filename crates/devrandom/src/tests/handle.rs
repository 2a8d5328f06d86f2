// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::DeviceError;
use crate::handle::{DeviceHandle, ReadPolicy};
use crate::traits::RandomDevice;

fn temp_device(name: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "devrandom-handle-{}-{}",
        std::process::id(),
        name
    ));
    fs::write(&path, contents).expect("Failed to write temp device");
    path
}

#[test]
fn test_open_missing_path_is_not_found() {
    let path = std::env::temp_dir().join("devrandom-handle-does-not-exist");
    let result = DeviceHandle::open(&path);

    assert!(matches!(result, Err(DeviceError::NotFound(p)) if p == path));
}

#[test]
fn test_open_relative_path_is_not_found() {
    // Exists relative to the crate root, but is not absolute.
    let result = DeviceHandle::open(Path::new("Cargo.toml"));

    assert!(matches!(result, Err(DeviceError::NotFound(_))));
}

#[test]
fn test_open_reports_open_and_writable() {
    let path = temp_device("open", &[1, 2, 3, 4]);
    let handle = DeviceHandle::open(&path).expect("Failed to open(..)");

    assert!(handle.is_open());
    assert!(handle.is_writable());
    assert_eq!(handle.path(), path.as_path());

    drop(handle);
    fs::remove_file(&path).expect("Failed to remove temp device");
}

#[test]
fn test_read_exact_returns_device_bytes() {
    let path = temp_device("read", &[0x10, 0x20, 0x30, 0x40, 0x50]);
    let mut handle = DeviceHandle::open(&path).expect("Failed to open(..)");

    let bytes = handle.read_exact(4).expect("Failed to read_exact(..)");
    assert_eq!(bytes, vec![0x10, 0x20, 0x30, 0x40]);

    drop(handle);
    fs::remove_file(&path).expect("Failed to remove temp device");
}

#[test]
fn test_read_exact_short_read_is_zero_padded() {
    let path = temp_device("short", &[0xAA, 0xBB, 0xCC]);
    let mut handle = DeviceHandle::open(&path).expect("Failed to open(..)");

    let bytes = handle.read_exact(8).expect("Failed to read_exact(..)");
    assert_eq!(bytes, vec![0xAA, 0xBB, 0xCC, 0, 0, 0, 0, 0]);

    drop(handle);
    fs::remove_file(&path).expect("Failed to remove temp device");
}

#[test]
fn test_fill_exact_reports_end_of_stream() {
    let path = temp_device("eof", &[0xAA, 0xBB, 0xCC]);
    let mut handle = DeviceHandle::open(&path).expect("Failed to open(..)");

    let mut buf = [0u8; 8];
    let result = handle.fill(&mut buf, ReadPolicy::FillExact);

    assert!(matches!(
        result,
        Err(DeviceError::IoFailure(ref err)) if err.kind() == ErrorKind::UnexpectedEof
    ));

    drop(handle);
    fs::remove_file(&path).expect("Failed to remove temp device");
}

#[test]
fn test_write_exact_reaches_device() {
    let path = temp_device("write", &[0xEE; 16]);
    let mut handle = DeviceHandle::open(&path).expect("Failed to open(..)");

    handle
        .write_exact(&[1, 2, 3, 4, 5, 6, 7, 8])
        .expect("Failed to write_exact(..)");
    handle.close();

    let contents = fs::read(&path).expect("Failed to read temp device");
    assert_eq!(&contents[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(&contents[8..], &[0xEE; 8]);

    fs::remove_file(&path).expect("Failed to remove temp device");
}

#[test]
fn test_close_is_idempotent() {
    let path = temp_device("close", &[0; 8]);
    let mut handle = DeviceHandle::open(&path).expect("Failed to open(..)");

    handle.close();
    handle.close();

    assert!(!handle.is_open());
    assert!(!handle.is_writable());

    drop(handle);
    fs::remove_file(&path).expect("Failed to remove temp device");
}

#[test]
fn test_use_after_close_is_rejected() {
    let path = temp_device("closed", &[0; 8]);
    let mut handle = DeviceHandle::open(&path).expect("Failed to open(..)");
    handle.close();

    assert!(matches!(handle.read_exact(4), Err(DeviceError::Closed)));
    assert!(matches!(handle.write_exact(&[0; 8]), Err(DeviceError::Closed)));

    drop(handle);
    fs::remove_file(&path).expect("Failed to remove temp device");
}

#[cfg(unix)]
#[test]
fn test_urandom_advances() {
    let mut handle = DeviceHandle::open("/dev/urandom").expect("Failed to open(..)");

    let first = handle.read_exact(32).expect("Failed to read_exact(..) (#0)");
    let second = handle.read_exact(32).expect("Failed to read_exact(..) (#1)");

    assert_eq!(first.len(), 32);
    assert_ne!(first, second);
}
