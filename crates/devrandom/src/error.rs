// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when opening, reading or seeding a random device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device path does not exist, is not readable, or is not absolute.
    #[error("NotFound: {}", .0.display())]
    NotFound(PathBuf),

    /// A device name outside the known set, or an out-of-range argument.
    #[error("InvalidArgument: {0}")]
    InvalidArgument(String),

    /// The host operating system is not one of the supported platforms.
    #[error("UnsupportedPlatform: {0:?}")]
    UnsupportedPlatform(String),

    /// A read or write failed after the device was opened.
    #[error("IoFailure: {0}")]
    IoFailure(#[from] io::Error),

    /// Serialization of a live device generator was attempted.
    #[error("NotSerializable")]
    NotSerializable,

    /// The generator was used after `close()`.
    #[error("Closed")]
    Closed,

    /// A bounded-latency read did not complete in time.
    #[error("TimedOut")]
    TimedOut,
}
