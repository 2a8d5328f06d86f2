// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand_core::TryRngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::Variant;
use crate::error::DeviceError;
use crate::handle::{DeviceHandle, ReadPolicy};
use crate::traits::RandomDevice;

/// Offset applied to every byte before packing.
///
/// Bytes are read as signed values in `-128..=127`; adding 128 maps them onto
/// `0..=255`. Must stay an addition on the signed value to keep derived
/// integers bit-compatible with existing consumers.
const SIGNED_BYTE_OFFSET: i32 = 128;

/// Lifecycle of a [`DevRandom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// The device is open; every derivation is valid.
    Open,
    /// The device was released. Terminal.
    Closed,
}

/// Random number generator reading directly from an entropy device.
///
/// There is no seed or internal state: every value is derived from fresh
/// device bytes, and [`set_seed`](Self::set_seed) feeds bytes back into the
/// device pool instead of resetting anything.
///
/// All methods take `&self`; reads and writes are serialized on an internal
/// mutex, so a generator can be shared across threads behind an `Arc`.
///
/// The device is released on [`close`](Self::close) or when the generator is
/// dropped. Using a closed generator yields [`DeviceError::Closed`].
pub struct DevRandom<D: RandomDevice = DeviceHandle> {
    device: Mutex<D>,
    variant: Variant,
    read_policy: ReadPolicy,
}

impl DevRandom<DeviceHandle> {
    /// Opens `path` after validating it against `variant`'s device table.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::InvalidArgument`] if `path` is not in the table.
    /// - [`DeviceError::NotFound`] if the device cannot be opened.
    pub fn open(variant: Variant, path: &str) -> Result<Self, DeviceError> {
        if !variant.catalog().is_known_device(path) {
            return Err(DeviceError::InvalidArgument(format!(
                "{path} is not a known random device"
            )));
        }

        let handle = DeviceHandle::open(Path::new(path))?;

        Ok(Self::from_device(handle, variant))
    }

    /// Opens the variant's preferred blocking or non-blocking device.
    pub fn open_preferred(variant: Variant, blocking: bool) -> Result<Self, DeviceError> {
        Self::open(variant, variant.catalog().preferred_device(blocking))
    }
}

impl<D: RandomDevice> DevRandom<D> {
    /// Wraps an already opened device.
    pub fn from_device(device: D, variant: Variant) -> Self {
        Self {
            device: Mutex::new(device),
            variant,
            read_policy: ReadPolicy::default(),
        }
    }

    /// Replaces the short-read policy.
    pub fn with_read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }

    /// The device table this generator was validated against.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The active short-read policy.
    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GeneratorState {
        if self.lock().is_open() {
            GeneratorState::Open
        } else {
            GeneratorState::Closed
        }
    }

    /// Whether seed write-back reaches the device.
    pub fn is_writable(&self) -> bool {
        self.lock().is_writable()
    }

    /// Releases the device. Idempotent.
    pub fn close(&self) {
        self.lock().close();
    }

    /// Consumes the generator and returns the device, open or not.
    pub fn into_inner(self) -> D {
        self.device
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, D> {
        // A panic while holding the lock cannot leave the device half-updated.
        self.device.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fills `dest` from the device, returning how many bytes were delivered.
    ///
    /// Bytes the device did not deliver are zero.
    pub fn fill_bytes(&self, dest: &mut [u8]) -> Result<usize, DeviceError> {
        self.lock().fill(dest, self.read_policy)
    }

    /// Reads `count` bytes. The buffer is zero padded if the device
    /// delivered fewer under [`ReadPolicy::SingleRead`].
    pub fn next_bytes(&self, count: usize) -> Result<Vec<u8>, DeviceError> {
        let mut buf = vec![0u8; count];
        self.fill_bytes(&mut buf)?;

        Ok(buf)
    }

    fn next_array<const N: usize>(&self) -> Result<[u8; N], DeviceError> {
        let mut buf = [0u8; N];
        self.fill_bytes(&mut buf)?;

        Ok(buf)
    }

    /// Reads one byte; odd means `true`.
    pub fn next_boolean(&self) -> Result<bool, DeviceError> {
        let [byte] = self.next_array::<1>()?;

        Ok(byte & 1 == 1)
    }

    /// Reads four bytes and packs them big-endian after the signed offset.
    pub fn next_int32(&self) -> Result<i32, DeviceError> {
        Ok(pack_i32(self.next_array::<4>()?))
    }

    /// Returns `|next_int32() % bound|`.
    ///
    /// Not uniform: the low residues are slightly favoured, and both signs of
    /// the remainder fold onto the same value. The result lies in
    /// `0..bound`; the absolute value cannot overflow because the remainder
    /// of a positive divisor is always greater than `-bound`.
    ///
    /// # Errors
    ///
    /// [`DeviceError::InvalidArgument`] if `bound <= 0`.
    pub fn next_int32_bounded(&self, bound: i32) -> Result<i32, DeviceError> {
        if bound <= 0 {
            return Err(DeviceError::InvalidArgument(format!(
                "bound must be positive, got {bound}"
            )));
        }

        Ok((self.next_int32()? % bound).abs())
    }

    /// Reads eight bytes and packs them big-endian after the signed offset.
    pub fn next_int64(&self) -> Result<i64, DeviceError> {
        Ok(pack_i64(self.next_array::<8>()?))
    }

    /// Returns the low `bit_count` bits of a fresh [`next_int32`](Self::next_int32).
    ///
    /// Every call costs one full device read; no bits are buffered between
    /// calls. Floating-point derivations build on this primitive.
    ///
    /// # Errors
    ///
    /// [`DeviceError::InvalidArgument`] if `bit_count > 32`.
    pub fn next_bits(&self, bit_count: u32) -> Result<i32, DeviceError> {
        if bit_count > 32 {
            return Err(DeviceError::InvalidArgument(format!(
                "bit count must be at most 32, got {bit_count}"
            )));
        }

        Ok(self.next_int32()? & bits_mask(bit_count))
    }

    /// Feeds `seed` back into the device pool, low byte first.
    ///
    /// Advisory: a no-op when the device is not writable, and write failures
    /// are logged rather than returned.
    ///
    /// # Errors
    ///
    /// [`DeviceError::Closed`] if the generator was closed.
    pub fn set_seed(&self, seed: i64) -> Result<(), DeviceError> {
        let mut device = self.lock();

        if !device.is_open() {
            return Err(DeviceError::Closed);
        }

        if !device.is_writable() {
            return Ok(());
        }

        if let Err(err) = device.write_exact(&seed.to_le_bytes()) {
            warn!("seed write-back failed: {}", err);
        }

        Ok(())
    }
}

#[inline]
fn offset_byte(byte: u8) -> i32 {
    byte as i8 as i32 + SIGNED_BYTE_OFFSET
}

pub(crate) fn pack_i32(bytes: [u8; 4]) -> i32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | offset_byte(b) as u32) as i32
}

pub(crate) fn pack_i64(bytes: [u8; 8]) -> i64 {
    bytes
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | offset_byte(b) as u64) as i64
}

pub(crate) fn bits_mask(bit_count: u32) -> i32 {
    ((1u64 << bit_count) - 1) as u32 as i32
}

impl<D: RandomDevice> fmt::Debug for DevRandom<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DevRandom")
            .field("variant", &self.variant)
            .field("read_policy", &self.read_policy)
            .field("state", &self.state())
            .finish()
    }
}

/// Adapts the generator to the `rand` ecosystem.
///
/// Wrap in [`rand_core::UnwrapErr`] to obtain an infallible `RngCore` and,
/// through it, the whole `rand::Rng` API.
impl<D: RandomDevice> TryRngCore for DevRandom<D> {
    type Error = DeviceError;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Ok(self.next_int32()? as u32)
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Ok(self.next_int64()? as u64)
    }

    // `rand_core` callers expect `dst` to be filled entirely, whatever the
    // configured policy.
    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.lock().fill(dst, ReadPolicy::FillExact)?;
        Ok(())
    }
}

// A live device handle cannot be rebuilt from bytes; refuse both directions.
impl<D: RandomDevice> Serialize for DevRandom<D> {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom(DeviceError::NotSerializable))
    }
}

impl<'de, D: RandomDevice> Deserialize<'de> for DevRandom<D> {
    fn deserialize<De: Deserializer<'de>>(_deserializer: De) -> Result<Self, De::Error> {
        Err(serde::de::Error::custom(DeviceError::NotSerializable))
    }
}
