// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logical and physical CEC addresses.

use std::fmt;

/// Logical address of a device on the CEC bus (low nibble of the header).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalAddress {
    /// Television.
    Tv,
    /// Recording device 1.
    RecordingDevice1,
    /// Recording device 2.
    RecordingDevice2,
    /// Tuner 1.
    Tuner1,
    /// Playback device 1.
    PlaybackDevice1,
    /// Audio system (the receiver this bridge stands in for).
    AudioSystem,
    /// Tuner 2.
    Tuner2,
    /// Tuner 3.
    Tuner3,
    /// Playback device 2.
    PlaybackDevice2,
    /// Recording device 3.
    RecordingDevice3,
    /// Tuner 4.
    Tuner4,
    /// Playback device 3.
    PlaybackDevice3,
    /// Reserved address 12.
    Reserved1,
    /// Reserved address 13.
    Reserved2,
    /// Free use.
    FreeUse,
    /// Unregistered as initiator, broadcast as destination.
    Broadcast,
}

impl LogicalAddress {
    /// Returns the 4-bit address value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Tv => 0,
            Self::RecordingDevice1 => 1,
            Self::RecordingDevice2 => 2,
            Self::Tuner1 => 3,
            Self::PlaybackDevice1 => 4,
            Self::AudioSystem => 5,
            Self::Tuner2 => 6,
            Self::Tuner3 => 7,
            Self::PlaybackDevice2 => 8,
            Self::RecordingDevice3 => 9,
            Self::Tuner4 => 10,
            Self::PlaybackDevice3 => 11,
            Self::Reserved1 => 12,
            Self::Reserved2 => 13,
            Self::FreeUse => 14,
            Self::Broadcast => 15,
        }
    }
}

impl From<u8> for LogicalAddress {
    /// Only the low nibble is significant.
    fn from(value: u8) -> Self {
        match value & 0x0F {
            0 => Self::Tv,
            1 => Self::RecordingDevice1,
            2 => Self::RecordingDevice2,
            3 => Self::Tuner1,
            4 => Self::PlaybackDevice1,
            5 => Self::AudioSystem,
            6 => Self::Tuner2,
            7 => Self::Tuner3,
            8 => Self::PlaybackDevice2,
            9 => Self::RecordingDevice3,
            10 => Self::Tuner4,
            11 => Self::PlaybackDevice3,
            12 => Self::Reserved1,
            13 => Self::Reserved2,
            14 => Self::FreeUse,
            _ => Self::Broadcast,
        }
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:X})", self, self.as_u8())
    }
}

/// HDMI physical address (`a.b.c.d`), one nibble per topology level.
///
/// # Examples
///
/// ```
/// use musiccast_cec::cec::PhysicalAddress;
///
/// let addr = PhysicalAddress::from_le_bytes(0x00, 0x12);
/// assert_eq!(addr.to_string(), "1.2.0.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PhysicalAddress(u16);

impl PhysicalAddress {
    /// Creates an address from its raw value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Decodes an address stored low byte first.
    #[must_use]
    pub const fn from_le_bytes(low: u8, high: u8) -> Self {
        Self(u16::from_le_bytes([low, high]))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{}.{}.{}.{}",
            (v >> 12) & 0xF,
            (v >> 8) & 0xF,
            (v >> 4) & 0xF,
            v & 0xF
        )
    }
}
