// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CEC opcodes and remote-control key codes.
//!
//! Only the operations the bridge reacts to or emits, plus a few it is
//! likely to see in logs, are named. Everything else is carried as
//! [`Opcode::Other`].

use std::fmt;

/// CEC operation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `<Feature Abort>`
    FeatureAbort,
    /// `<Standby>`
    Standby,
    /// `<User Control Pressed>`
    UserControlPressed,
    /// `<User Control Released>`
    UserControlReleased,
    /// `<System Audio Mode Request>`
    SystemAudioModeRequest,
    /// `<Give Audio Status>`
    GiveAudioStatus,
    /// `<Set System Audio Mode>`
    SetSystemAudioMode,
    /// `<Report Audio Status>`
    ReportAudioStatus,
    /// `<Give System Audio Mode Status>`
    GiveSystemAudioModeStatus,
    /// `<System Audio Mode Status>`
    SystemAudioModeStatus,
    /// `<Active Source>`
    ActiveSource,
    /// `<Give Device Power Status>`
    GiveDevicePowerStatus,
    /// `<Report Power Status>`
    ReportPowerStatus,
    /// Any opcode not listed above.
    Other(u8),
}

impl Opcode {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::FeatureAbort => 0x00,
            Self::Standby => 0x36,
            Self::UserControlPressed => 0x44,
            Self::UserControlReleased => 0x45,
            Self::SystemAudioModeRequest => 0x70,
            Self::GiveAudioStatus => 0x71,
            Self::SetSystemAudioMode => 0x72,
            Self::ReportAudioStatus => 0x7A,
            Self::GiveSystemAudioModeStatus => 0x7D,
            Self::SystemAudioModeStatus => 0x7E,
            Self::ActiveSource => 0x82,
            Self::GiveDevicePowerStatus => 0x8F,
            Self::ReportPowerStatus => 0x90,
            Self::Other(value) => value,
        }
    }

    /// Returns the CEC name, or `UNKNOWN` for [`Opcode::Other`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FeatureAbort => "FEATURE_ABORT",
            Self::Standby => "STANDBY",
            Self::UserControlPressed => "USER_CONTROL_PRESSED",
            Self::UserControlReleased => "USER_CONTROL_RELEASED",
            Self::SystemAudioModeRequest => "SYSTEM_AUDIO_MODE_REQUEST",
            Self::GiveAudioStatus => "GIVE_AUDIO_STATUS",
            Self::SetSystemAudioMode => "SET_SYSTEM_AUDIO_MODE",
            Self::ReportAudioStatus => "REPORT_AUDIO_STATUS",
            Self::GiveSystemAudioModeStatus => "GIVE_SYSTEM_AUDIO_MODE_STATUS",
            Self::SystemAudioModeStatus => "SYSTEM_AUDIO_MODE_STATUS",
            Self::ActiveSource => "ACTIVE_SOURCE",
            Self::GiveDevicePowerStatus => "GIVE_DEVICE_POWER_STATUS",
            Self::ReportPowerStatus => "REPORT_POWER_STATUS",
            Self::Other(_) => "UNKNOWN",
        }
    }
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        match value {
            0x00 => Self::FeatureAbort,
            0x36 => Self::Standby,
            0x44 => Self::UserControlPressed,
            0x45 => Self::UserControlReleased,
            0x70 => Self::SystemAudioModeRequest,
            0x71 => Self::GiveAudioStatus,
            0x72 => Self::SetSystemAudioMode,
            0x7A => Self::ReportAudioStatus,
            0x7D => Self::GiveSystemAudioModeStatus,
            0x7E => Self::SystemAudioModeStatus,
            0x82 => Self::ActiveSource,
            0x8F => Self::GiveDevicePowerStatus,
            0x90 => Self::ReportPowerStatus,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02x})", self.name(), self.as_u8())
    }
}

/// Key code carried by `<User Control Pressed>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserControlCode {
    /// Volume up.
    VolumeUp,
    /// Volume down.
    VolumeDown,
    /// Mute toggle.
    Mute,
    /// Any other key.
    Other(u8),
}

impl UserControlCode {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::VolumeUp => 0x41,
            Self::VolumeDown => 0x42,
            Self::Mute => 0x43,
            Self::Other(value) => value,
        }
    }
}

impl From<u8> for UserControlCode {
    fn from(value: u8) -> Self {
        match value {
            0x41 => Self::VolumeUp,
            0x42 => Self::VolumeDown,
            0x43 => Self::Mute,
            other => Self::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_wire_values() {
        assert_eq!(Opcode::from(0x70), Opcode::SystemAudioModeRequest);
        assert_eq!(Opcode::from(0x44), Opcode::UserControlPressed);
        assert_eq!(Opcode::from(0x36), Opcode::Standby);
        assert_eq!(Opcode::from(0x71), Opcode::GiveAudioStatus);
        assert_eq!(Opcode::SetSystemAudioMode.as_u8(), 0x72);
        assert_eq!(Opcode::ReportAudioStatus.as_u8(), 0x7A);
    }

    #[test]
    fn opcode_unknown_is_preserved() {
        let opcode = Opcode::from(0xA0);
        assert_eq!(opcode, Opcode::Other(0xA0));
        assert_eq!(opcode.as_u8(), 0xA0);
        assert_eq!(opcode.to_string(), "UNKNOWN (0xa0)");
    }

    #[test]
    fn opcode_display() {
        assert_eq!(Opcode::Standby.to_string(), "STANDBY (0x36)");
    }

    #[test]
    fn user_control_codes() {
        assert_eq!(UserControlCode::from(0x41), UserControlCode::VolumeUp);
        assert_eq!(UserControlCode::from(0x42), UserControlCode::VolumeDown);
        assert_eq!(UserControlCode::from(0x00), UserControlCode::Other(0x00));
        assert_eq!(UserControlCode::Mute.as_u8(), 0x43);
    }
}
