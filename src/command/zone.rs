// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Main zone commands.

use crate::command::Command;
use crate::types::{PowerState, VolumeStep};

/// Zone the commands are addressed to. Only the main zone is modelled.
const ZONE: &str = "main";

/// Command addressed to the receiver's main zone.
///
/// # Examples
///
/// ```
/// use musiccast_cec::command::{Command, ZoneCommand};
/// use musiccast_cec::types::VolumeStep;
///
/// let up = ZoneCommand::StepVolume(VolumeStep::Up);
/// assert_eq!(up.path(), "main/setVolume");
/// assert_eq!(up.query(), Some(("volume", "up".to_string())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneCommand {
    /// Switch the zone on or to standby.
    SetPower(PowerState),
    /// Select the active input by its MusicCast identifier.
    SetInput(String),
    /// Set an absolute volume.
    SetVolume(u32),
    /// Change volume by one step.
    StepVolume(VolumeStep),
    /// Query the zone status.
    GetStatus,
}

impl Command for ZoneCommand {
    fn path(&self) -> String {
        let action = match self {
            Self::SetPower(_) => "setPower",
            Self::SetInput(_) => "setInput",
            Self::SetVolume(_) | Self::StepVolume(_) => "setVolume",
            Self::GetStatus => "getStatus",
        };
        format!("{ZONE}/{action}")
    }

    fn query(&self) -> Option<(&'static str, String)> {
        match self {
            Self::SetPower(state) => Some(("power", state.as_str().to_string())),
            Self::SetInput(input) => Some(("input", input.clone())),
            Self::SetVolume(volume) => Some(("volume", volume.to_string())),
            Self::StepVolume(step) => Some(("volume", step.as_str().to_string())),
            Self::GetStatus => None,
        }
    }
}
