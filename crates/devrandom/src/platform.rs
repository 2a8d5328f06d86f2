// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Host platform classification and generator construction.

use crate::catalog::{BLOCKING, Variant};
use crate::error::DeviceError;
use crate::generator::DevRandom;
use crate::handle::ReadPolicy;

/// Operating systems with a known entropy device layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// `"Mac OS X"`
    MacOsX,
    /// `"Linux"`
    Linux,
    /// `"FreeBSD"`
    FreeBsd,
    /// `"OpenBSD"`
    OpenBsd,
    /// `"NetBSD"`
    NetBsd,
    /// `"DragonFly"`
    DragonFly,
}

impl Platform {
    /// Every supported platform.
    pub const ALL: [Platform; 6] = [
        Platform::MacOsX,
        Platform::Linux,
        Platform::FreeBsd,
        Platform::OpenBsd,
        Platform::NetBsd,
        Platform::DragonFly,
    ];

    /// Canonical identity string.
    pub fn os_name(self) -> &'static str {
        match self {
            Platform::MacOsX => "Mac OS X",
            Platform::Linux => "Linux",
            Platform::FreeBsd => "FreeBSD",
            Platform::OpenBsd => "OpenBSD",
            Platform::NetBsd => "NetBSD",
            Platform::DragonFly => "DragonFly",
        }
    }
}

/// Maps an identity string onto a [`Platform`]. Matching is exact and
/// case-sensitive.
///
/// # Errors
///
/// [`DeviceError::UnsupportedPlatform`] for anything else, including `""`.
pub fn classify_platform(os_name: &str) -> Result<Platform, DeviceError> {
    Platform::ALL
        .into_iter()
        .find(|platform| platform.os_name() == os_name)
        .ok_or_else(|| DeviceError::UnsupportedPlatform(os_name.to_owned()))
}

/// The generator variant used on `platform`.
pub fn resolve_variant(platform: Platform) -> Variant {
    match platform {
        Platform::OpenBsd => Variant::OpenBsd,
        Platform::MacOsX
        | Platform::Linux
        | Platform::FreeBsd
        | Platform::NetBsd
        | Platform::DragonFly => Variant::Standard,
    }
}

/// Identity string of the running host, in the form [`classify_platform`]
/// expects.
///
/// Targets without a supported entropy device are returned unchanged and
/// will classify as unsupported.
pub fn host_os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "Mac OS X",
        "linux" => "Linux",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        "dragonfly" => "DragonFly",
        other => other,
    }
}

/// Builds generators for one platform identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSelector {
    os_name: String,
    read_policy: ReadPolicy,
}

impl PlatformSelector {
    /// Selector for an explicit identity string.
    pub fn new(os_name: impl Into<String>) -> Self {
        Self {
            os_name: os_name.into(),
            read_policy: ReadPolicy::default(),
        }
    }

    /// Selector for the running host.
    pub fn for_host() -> Self {
        Self::new(host_os_name())
    }

    /// Short-read policy applied to every generator this selector builds.
    pub fn with_read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }

    /// The identity string this selector classifies.
    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    /// Classifies the identity string.
    pub fn platform(&self) -> Result<Platform, DeviceError> {
        classify_platform(&self.os_name)
    }

    /// Resolves the generator variant for the identity string.
    pub fn variant(&self) -> Result<Variant, DeviceError> {
        let platform = self.platform()?;
        let variant = resolve_variant(platform);
        debug!("platform {:?} resolved to variant {:?}", platform, variant);

        Ok(variant)
    }

    /// Generator on the platform's preferred blocking device.
    pub fn create_default(&self) -> Result<DevRandom, DeviceError> {
        self.create_with_blocking_preference(BLOCKING)
    }

    /// Generator on the platform's preferred device for `blocking`.
    pub fn create_with_blocking_preference(
        &self,
        blocking: bool,
    ) -> Result<DevRandom, DeviceError> {
        let variant = self.variant()?;

        Ok(DevRandom::open_preferred(variant, blocking)?.with_read_policy(self.read_policy))
    }

    /// Generator on an explicit device path.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::UnsupportedPlatform`] if the identity is unknown.
    /// - [`DeviceError::InvalidArgument`] if `path` is not in the platform's
    ///   device table.
    /// - [`DeviceError::NotFound`] if the device cannot be opened.
    pub fn create_with_device(&self, path: &str) -> Result<DevRandom, DeviceError> {
        let variant = self.variant()?;

        Ok(DevRandom::open(variant, path)?.with_read_policy(self.read_policy))
    }
}

/// Generator on the host's preferred blocking device.
pub fn create_default() -> Result<DevRandom, DeviceError> {
    PlatformSelector::for_host().create_default()
}

/// Generator on the host's preferred device for `blocking`.
pub fn create_with_blocking_preference(blocking: bool) -> Result<DevRandom, DeviceError> {
    PlatformSelector::for_host().create_with_blocking_preference(blocking)
}

/// Generator on an explicit device path of the host.
pub fn create_with_device(path: &str) -> Result<DevRandom, DeviceError> {
    PlatformSelector::for_host().create_with_device(path)
}
