// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io;

use crate::error::DeviceError;
use crate::handle::ReadPolicy;

/// Raw byte channel to an entropy device.
///
/// [`DeviceHandle`](crate::DeviceHandle) is the production implementation;
/// tests substitute a scripted double. Implementations are not required to be
/// safe for concurrent access: [`DevRandom`](crate::DevRandom) serializes all
/// calls.
pub trait RandomDevice {
    /// Performs one read into `dest`, returning the number of bytes delivered.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Closed`] after [`close`](Self::close), or
    /// [`DeviceError::IoFailure`] if the underlying read fails.
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, DeviceError>;

    /// Writes all of `bytes` and forces them to the device.
    ///
    /// Silently returns `Ok(())` without writing when the device has no
    /// writable channel.
    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), DeviceError>;

    /// Whether a writable channel was obtained at open time.
    fn is_writable(&self) -> bool;

    /// Whether the device is still open.
    fn is_open(&self) -> bool;

    /// Releases every channel. Idempotent.
    fn close(&mut self);

    /// Fills `dest` according to `policy`, returning the number of bytes read.
    ///
    /// Under [`ReadPolicy::SingleRead`] a short read is returned as-is and the
    /// tail of `dest` is zeroed. Under [`ReadPolicy::FillExact`] reads repeat
    /// until `dest` is full; a zero-length read is reported as
    /// [`io::ErrorKind::UnexpectedEof`]. Interrupted reads are retried under
    /// both policies.
    fn fill(&mut self, dest: &mut [u8], policy: ReadPolicy) -> Result<usize, DeviceError> {
        if dest.is_empty() {
            return Ok(0);
        }

        match policy {
            ReadPolicy::SingleRead => {
                let read = read_uninterrupted(self, dest)?;
                if read < dest.len() {
                    debug!("short read: {} of {} bytes", read, dest.len());
                    dest[read..].fill(0);
                }
                Ok(read)
            }
            ReadPolicy::FillExact => {
                let mut filled = 0;
                while filled < dest.len() {
                    match read_uninterrupted(self, &mut dest[filled..])? {
                        0 => {
                            return Err(DeviceError::IoFailure(io::Error::new(
                                io::ErrorKind::UnexpectedEof,
                                "random device reached end of stream",
                            )));
                        }
                        n => filled += n,
                    }
                }
                Ok(filled)
            }
        }
    }
}

fn read_uninterrupted<D: RandomDevice + ?Sized>(
    device: &mut D,
    dest: &mut [u8],
) -> Result<usize, DeviceError> {
    loop {
        match device.read(dest) {
            Err(DeviceError::IoFailure(err)) if err.kind() == io::ErrorKind::Interrupted => {
                continue;
            }
            result => return result,
        }
    }
}
