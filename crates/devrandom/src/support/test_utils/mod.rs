// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for mocking random devices.
//!
//! Provides a scripted device with configurable failure behaviour.

mod mock_device;

pub use mock_device::{MockDevice, MockDeviceBehaviour};
