// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power-related types for the receiver's main zone.

use std::fmt;

use serde::Deserialize;

/// Power state that can be requested from the main zone.
///
/// # Examples
///
/// ```
/// use musiccast_cec::types::PowerState;
///
/// assert_eq!(PowerState::On.as_str(), "on");
/// assert_eq!(PowerState::Standby.as_str(), "standby");
/// assert_eq!(PowerState::from(false), PowerState::Standby);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    /// Zone is powered on.
    On,
    /// Zone is in standby.
    Standby,
}

impl PowerState {
    /// Returns the value used by the MusicCast API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Standby => "standby",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Standby }
    }
}

/// Power state reported by `getStatus`.
///
/// The receiver may report states other than `on` and `standby` while it is
/// switching; those all map to [`ZonePower::Transitional`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZonePower {
    /// Zone is on.
    On,
    /// Zone is in standby.
    Standby,
    /// Any other reported state.
    #[serde(other)]
    Transitional,
}
