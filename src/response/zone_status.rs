// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone status response parsing.

use serde::Deserialize;

use crate::types::ZonePower;

/// Snapshot of the main zone returned by `main/getStatus`.
///
/// The snapshot is only authoritative for the instant it was read; callers
/// fetch a fresh one whenever they need it.
///
/// # Examples
///
/// ```
/// use musiccast_cec::response::ZoneStatus;
/// use musiccast_cec::types::ZonePower;
///
/// let json = r#"{
///     "response_code": 0,
///     "power": "on",
///     "sleep": 0,
///     "volume": 80,
///     "mute": false,
///     "max_volume": 161,
///     "input": "hdmi1"
/// }"#;
/// let status: ZoneStatus = serde_json::from_str(json).unwrap();
/// assert_eq!(status.power, ZonePower::On);
/// assert_eq!(status.input, "hdmi1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZoneStatus {
    /// Reported power state.
    pub power: ZonePower,

    /// Sleep timer in minutes, `0` when disabled.
    #[serde(default)]
    pub sleep: u32,

    /// Current volume, `0..=max_volume`.
    pub volume: u32,

    /// Highest volume the zone accepts.
    pub max_volume: u32,

    /// Whether the zone is muted.
    pub mute: bool,

    /// Identifier of the active input.
    pub input: String,
}

impl ZoneStatus {
    /// Returns `true` if `input` is the active input.
    #[must_use]
    pub fn is_input_active(&self, input: &str) -> bool {
        self.input == input
    }
}
