// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge configuration.

use std::time::Duration;

use crate::protocol::HttpConfig;

/// What the bridge does to the receiver on the TV's behalf.
///
/// # Examples
///
/// ```
/// use musiccast_cec::DeviceConfig;
/// use std::time::Duration;
///
/// let config = DeviceConfig::new("hdmi1", "192.168.1.20")
///     .with_target_volume(70)
///     .with_settle_delay(Duration::from_secs(2));
///
/// assert_eq!(config.input_name(), "hdmi1");
/// assert_eq!(config.target_volume(), 70);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    input_name: String,
    target_volume: u32,
    address: String,
    settle_delay: Duration,
}

impl DeviceConfig {
    /// Volume applied on power-on when none is configured.
    pub const DEFAULT_TARGET_VOLUME: u32 = 90;

    /// Time the receiver needs to finish its own volume levelling after an
    /// input change, before an explicit volume sticks.
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(3);

    /// Creates a configuration for the input the TV is wired to and the
    /// receiver's network address.
    #[must_use]
    pub fn new(input_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            input_name: input_name.into(),
            target_volume: Self::DEFAULT_TARGET_VOLUME,
            address: address.into(),
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
        }
    }

    /// Sets the volume applied on power-on.
    #[must_use]
    pub fn with_target_volume(mut self, volume: u32) -> Self {
        self.target_volume = volume;
        self
    }

    /// Sets the delay between selecting the input and setting the volume.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// MusicCast input identifier selected on power-on.
    #[must_use]
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Volume applied on power-on.
    #[must_use]
    pub fn target_volume(&self) -> u32 {
        self.target_volume
    }

    /// Receiver network address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Delay between input selection and volume.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// HTTP settings for reaching the receiver at [`address`](Self::address).
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::new(self.address.clone())
    }
}
