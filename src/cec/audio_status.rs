// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `<Report Audio Status>` operand encoding.
//!
//! The operand is a single byte: the low seven bits carry the volume scaled
//! to `0..=100`, the high bits carry the mute flag. Muted reports set the
//! whole high nibble (`0xF0`), which TVs accept as "muted".

use crate::error::ValueError;
use crate::response::ZoneStatus;

/// Bits set in the operand when the zone is muted.
pub const MUTE_BITS: u8 = 0xF0;

/// Mask applied to the scaled volume.
pub const VOLUME_MASK: u8 = 0x7F;

/// Audio status as reported to the TV.
///
/// # Examples
///
/// ```
/// use musiccast_cec::cec::AudioStatus;
///
/// let status = AudioStatus::from_volume(80, 161, false).unwrap();
/// assert_eq!(status.volume(), 49);
/// assert_eq!(status.to_byte(), 0x31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioStatus {
    volume: u8,
    muted: bool,
}

impl AudioStatus {
    /// Scales a receiver volume to a percentage.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::ZeroMaxVolume` if `max_volume` is zero.
    pub fn from_volume(volume: u32, max_volume: u32, muted: bool) -> Result<Self, ValueError> {
        if max_volume == 0 {
            return Err(ValueError::ZeroMaxVolume);
        }
        let percent = u64::from(volume) * 100 / u64::from(max_volume);
        // Masked to seven bits
        #[allow(clippy::cast_possible_truncation)]
        let volume = (percent & u64::from(VOLUME_MASK)) as u8;
        Ok(Self { volume, muted })
    }

    /// Builds the report from a fresh zone snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::ZeroMaxVolume` if the zone reports a zero maximum.
    pub fn from_zone_status(status: &ZoneStatus) -> Result<Self, ValueError> {
        Self::from_volume(status.volume, status.max_volume, status.mute)
    }

    /// Scaled volume, `0..=127`.
    #[must_use]
    pub const fn volume(&self) -> u8 {
        self.volume
    }

    /// Whether the zone is muted.
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Encodes the operand byte.
    #[must_use]
    pub const fn to_byte(&self) -> u8 {
        let mute = if self.muted { MUTE_BITS } else { 0x00 };
        mute | self.volume
    }
}
