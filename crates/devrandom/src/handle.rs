// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::DeviceError;
use crate::probe;
use crate::traits::RandomDevice;

/// How a request for `n` bytes is satisfied by the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReadPolicy {
    /// One read call per request. A short read is returned as-is and the
    /// unfilled tail of the buffer stays zero.
    #[default]
    SingleRead,
    /// Repeat reads until the buffer is full.
    FillExact,
}

/// Open connection to one entropy device.
///
/// Holds a readable channel for its whole open lifetime and, if the path was
/// writable when opened, a writable channel used for seed write-back. Both
/// channels are released by [`close`](Self::close) or when the handle is
/// dropped, whichever comes first.
#[derive(Debug)]
pub struct DeviceHandle {
    path: PathBuf,
    input: Option<File>,
    output: Option<File>,
}

impl DeviceHandle {
    /// Opens `path` for reading, and for writing when permitted.
    ///
    /// Write access is probed, not required: if it cannot be obtained the
    /// handle is simply not writable and seeding becomes a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] if `path` is relative, missing or
    /// unreadable, including when the open itself is refused.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref();

        if !probe::is_usable_device(path) {
            return Err(DeviceError::NotFound(path.to_path_buf()));
        }

        let input = File::open(path).map_err(|_| DeviceError::NotFound(path.to_path_buf()))?;

        let output = if probe::is_writable(path) {
            match OpenOptions::new().write(true).open(path) {
                Ok(file) => Some(file),
                Err(err) => {
                    debug!("{} passed the write probe but open failed: {}", path.display(), err);
                    None
                }
            }
        } else {
            None
        };

        info!("opened random device {} (writable: {})", path.display(), output.is_some());

        Ok(Self {
            path: path.to_path_buf(),
            input: Some(input),
            output,
        })
    }

    /// The path this handle was opened against.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Performs a single read of `count` bytes.
    ///
    /// Short reads are not retried: the returned buffer always has `count`
    /// bytes, and any bytes the device did not deliver are zero.
    pub fn read_exact(&mut self, count: usize) -> Result<Vec<u8>, DeviceError> {
        let mut buf = vec![0u8; count];
        self.fill(&mut buf, ReadPolicy::SingleRead)?;

        Ok(buf)
    }
}

impl RandomDevice for DeviceHandle {
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, DeviceError> {
        let input = self.input.as_mut().ok_or(DeviceError::Closed)?;

        Ok(input.read(dest)?)
    }

    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), DeviceError> {
        if self.input.is_none() {
            return Err(DeviceError::Closed);
        }

        let Some(output) = self.output.as_mut() else {
            return Ok(());
        };

        output.write_all(bytes)?;
        output.flush()?;

        // Character devices reject fsync with EINVAL; the write already landed.
        if let Err(err) = output.sync_data() {
            if err.kind() != io::ErrorKind::InvalidInput {
                return Err(err.into());
            }
        }

        Ok(())
    }

    fn is_writable(&self) -> bool {
        self.output.is_some()
    }

    fn is_open(&self) -> bool {
        self.input.is_some()
    }

    fn close(&mut self) {
        // Dropping the files closes the descriptors.
        let had_input = self.input.take().is_some();
        let had_output = self.output.take().is_some();

        if had_input || had_output {
            info!("closed random device {}", self.path.display());
        }
    }
}

impl Drop for DeviceHandle {
    fn drop(&mut self) {
        self.close();
    }
}
