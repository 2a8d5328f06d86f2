// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io;
use std::thread;
use std::time::Duration;

use crate::error::DeviceError;
use crate::traits::RandomDevice;

/// Configurable behaviour for [`MockDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockDeviceBehaviour {
    /// Normal operation (replays the script).
    None,
    /// Every read fails.
    FailAtRead,
    /// Every write fails.
    FailAtWrite,
    /// Each read delivers at most this many bytes.
    ShortRead(usize),
    /// Each read sleeps this long before delivering.
    Stall(Duration),
    /// The next read fails with `Interrupted`, then behaviour reverts to
    /// `None`.
    InterruptOnce,
}

/// Scripted random device for testing.
///
/// Replays a fixed byte script. A cycling script wraps around forever; a
/// finite one reports end of stream (a zero-length read) once exhausted.
/// Every write is recorded.
#[derive(Debug)]
pub struct MockDevice {
    script: Vec<u8>,
    cursor: usize,
    cycle: bool,
    writable: bool,
    open: bool,
    behaviour: MockDeviceBehaviour,
    written: Vec<u8>,
    read_count: usize,
    write_count: usize,
}

impl MockDevice {
    /// Device that delivers `bytes` once, then end of stream.
    pub fn scripted(bytes: &[u8]) -> Self {
        Self::build(bytes.to_vec(), false)
    }

    /// Device that delivers `bytes` repeatedly.
    pub fn cycling(bytes: &[u8]) -> Self {
        assert!(!bytes.is_empty(), "cycling script must not be empty");
        Self::build(bytes.to_vec(), true)
    }

    /// Device that delivers `0, 1, 2, ..., 255, 0, 1, ...`.
    pub fn counting() -> Self {
        Self::build((0..=u8::MAX).collect(), true)
    }

    fn build(script: Vec<u8>, cycle: bool) -> Self {
        Self {
            script,
            cursor: 0,
            cycle,
            writable: false,
            open: true,
            behaviour: MockDeviceBehaviour::None,
            written: Vec::new(),
            read_count: 0,
            write_count: 0,
        }
    }

    /// Grants or revokes the writable channel.
    pub fn with_writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Sets the initial behaviour.
    pub fn with_behaviour(mut self, behaviour: MockDeviceBehaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    /// Changes the mock behaviour at runtime.
    pub fn change_behaviour(&mut self, behaviour: MockDeviceBehaviour) {
        self.behaviour = behaviour;
    }

    /// Every byte successfully written so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Number of `read` calls, failed ones included.
    pub fn read_count(&self) -> usize {
        self.read_count
    }

    /// Number of `write_exact` calls that reached the writable channel.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    fn next_byte(&mut self) -> Option<u8> {
        if self.cursor == self.script.len() {
            if !self.cycle {
                return None;
            }
            self.cursor = 0;
        }

        let byte = self.script[self.cursor];
        self.cursor += 1;

        Some(byte)
    }
}

impl RandomDevice for MockDevice {
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, DeviceError> {
        if !self.open {
            return Err(DeviceError::Closed);
        }

        self.read_count += 1;

        let limit = match self.behaviour {
            MockDeviceBehaviour::FailAtRead => {
                return Err(io::Error::other("mock read failure").into());
            }
            MockDeviceBehaviour::InterruptOnce => {
                self.behaviour = MockDeviceBehaviour::None;
                return Err(io::Error::from(io::ErrorKind::Interrupted).into());
            }
            MockDeviceBehaviour::ShortRead(max) => max.min(dest.len()),
            MockDeviceBehaviour::Stall(delay) => {
                thread::sleep(delay);
                dest.len()
            }
            MockDeviceBehaviour::None | MockDeviceBehaviour::FailAtWrite => dest.len(),
        };

        let mut delivered = 0;
        while delivered < limit {
            match self.next_byte() {
                Some(byte) => {
                    dest[delivered] = byte;
                    delivered += 1;
                }
                None => break,
            }
        }

        Ok(delivered)
    }

    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), DeviceError> {
        if !self.open {
            return Err(DeviceError::Closed);
        }

        if !self.writable {
            return Ok(());
        }

        self.write_count += 1;

        if self.behaviour == MockDeviceBehaviour::FailAtWrite {
            return Err(io::Error::other("mock write failure").into());
        }

        self.written.extend_from_slice(bytes);

        Ok(())
    }

    fn is_writable(&self) -> bool {
        self.writable
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
    }
}
