// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # devrandom
//!
//! Random number generation read straight from the operating system's entropy
//! device (`/dev/random`, `/dev/urandom`, ...), exposed through the same
//! surface as an in-memory generator.
//!
//! ## Core Types
//!
//! - [`DevRandom`]: generator deriving booleans and integers from device bytes
//! - [`DeviceHandle`]: open read (and optional write) channel to one device
//! - [`PlatformSelector`]: picks the device table for the host platform
//! - [`DeviceCatalog`] / [`Variant`]: per-platform device tables
//!
//! ## Traits
//!
//! - [`RandomDevice`]: raw byte channel the generator reads from
//!
//! ## Example
//!
//! ```rust,no_run
//! use devrandom::{PlatformSelector, NON_BLOCKING};
//!
//! let rng = PlatformSelector::for_host()
//!     .create_with_blocking_preference(NON_BLOCKING)
//!     .expect("Failed to open random device");
//!
//! let coin = rng.next_boolean().expect("Failed to read device");
//! let die = rng.next_int32_bounded(6).expect("Failed to read device") + 1;
//!
//! // Contribute to the device pool (no-op without write access).
//! rng.set_seed(0x5eed).expect("Generator is closed");
//!
//! rng.close();
//! ```
//!
//! ## `rand` integration
//!
//! [`DevRandom`] implements [`rand_core::TryRngCore`]. Wrapping it in
//! [`rand_core::UnwrapErr`] yields an infallible `RngCore`, which unlocks the
//! floating-point and distribution APIs of `rand`.
//!
//! ## Platform Support
//!
//! Mac OS X, Linux, FreeBSD, NetBSD and DragonFly use `/dev/random` and
//! `/dev/urandom`. OpenBSD additionally accepts `/dev/arandom` and
//! `/dev/srandom`, and prefers `/dev/random` in both modes.

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[macro_use]
mod log_macros;

#[cfg(test)]
mod tests;

mod catalog;
mod error;
mod generator;
mod handle;
mod platform;
mod probe;
mod support;
mod traits;

pub mod timeout;

pub use catalog::{
    BLOCKING, DEV_ARANDOM, DEV_RANDOM, DEV_SRANDOM, DEV_URANDOM, DeviceCatalog, NON_BLOCKING,
    Variant,
};
pub use error::DeviceError;
pub use generator::{DevRandom, GeneratorState};
pub use handle::{DeviceHandle, ReadPolicy};
pub use platform::{
    Platform, PlatformSelector, classify_platform, create_default, create_with_blocking_preference,
    create_with_device, host_os_name, resolve_variant,
};
pub use traits::RandomDevice;

#[cfg(any(test, feature = "test_utils"))]
pub use support::test_utils;
