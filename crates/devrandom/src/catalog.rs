// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Static knowledge about entropy devices, one table per platform variant.
//!
//! Platform differences are pure data: a [`Variant`] selects a
//! [`DeviceCatalog`] and nothing else changes between platforms.

/// Blocking preference for [`DeviceCatalog::preferred_device`].
pub const BLOCKING: bool = true;

/// Non-blocking preference for [`DeviceCatalog::preferred_device`].
pub const NON_BLOCKING: bool = false;

/// Device that may block until the kernel entropy pool is initialized.
pub const DEV_RANDOM: &str = "/dev/random";

/// Device that never blocks.
pub const DEV_URANDOM: &str = "/dev/urandom";

/// OpenBSD ARC4-backed device (legacy alias).
pub const DEV_ARANDOM: &str = "/dev/arandom";

/// OpenBSD "strong" device (legacy alias).
pub const DEV_SRANDOM: &str = "/dev/srandom";

/// Set of acceptable device paths plus the preferred path per blocking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCatalog {
    names: &'static [&'static str],
    preferred_blocking: &'static str,
    preferred_non_blocking: &'static str,
}

impl DeviceCatalog {
    /// Returns `true` iff `name` is one of the catalog's device paths.
    ///
    /// Matching is exact: no normalization, no case folding.
    pub fn is_known_device(&self, name: &str) -> bool {
        self.names.iter().any(|known| *known == name)
    }

    /// Returns the preferred device path for the requested blocking mode.
    pub fn preferred_device(&self, blocking: bool) -> &'static str {
        if blocking {
            self.preferred_blocking
        } else {
            self.preferred_non_blocking
        }
    }

    /// All device paths accepted by this catalog, in declaration order.
    pub fn device_names(&self) -> &'static [&'static str] {
        self.names
    }
}

static STANDARD: DeviceCatalog = DeviceCatalog {
    names: &[DEV_RANDOM, DEV_URANDOM],
    preferred_blocking: DEV_RANDOM,
    preferred_non_blocking: DEV_URANDOM,
};

// OpenBSD's /dev/random does not block, so it is preferred in both modes.
static OPENBSD: DeviceCatalog = DeviceCatalog {
    names: &[DEV_RANDOM, DEV_ARANDOM, DEV_SRANDOM, DEV_URANDOM],
    preferred_blocking: DEV_RANDOM,
    preferred_non_blocking: DEV_RANDOM,
};

/// Generator variant: which device table a generator validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// `/dev/random` and `/dev/urandom`.
    Standard,
    /// Standard set extended with the OpenBSD aliases.
    OpenBsd,
}

impl Variant {
    /// Every variant, in declaration order.
    pub const ALL: [Variant; 2] = [Variant::Standard, Variant::OpenBsd];

    /// The device table for this variant.
    pub fn catalog(self) -> &'static DeviceCatalog {
        match self {
            Variant::Standard => &STANDARD,
            Variant::OpenBsd => &OPENBSD,
        }
    }
}
