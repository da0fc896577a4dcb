// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MusicCast command definitions.
//!
//! The Yamaha Extended Control API is a set of `GET` endpoints of the form
//! `<zone>/<action>?<parameter>=<value>`. Each command here knows its path
//! and its single optional query parameter.
//!
//! | Command | Endpoint |
//! |---------|----------|
//! | [`ZoneCommand::SetPower`] | `main/setPower?power=on` |
//! | [`ZoneCommand::SetInput`] | `main/setInput?input=hdmi1` |
//! | [`ZoneCommand::SetVolume`] | `main/setVolume?volume=90` |
//! | [`ZoneCommand::StepVolume`] | `main/setVolume?volume=up` |
//! | [`ZoneCommand::GetStatus`] | `main/getStatus` |
//!
//! # Examples
//!
//! ```
//! use musiccast_cec::command::{Command, ZoneCommand};
//! use musiccast_cec::types::PowerState;
//!
//! let cmd = ZoneCommand::SetPower(PowerState::Standby);
//! assert_eq!(cmd.to_http_path(), "main/setPower?power=standby");
//! ```

mod zone;

pub use zone::ZoneCommand;

/// A command that can be sent to the receiver.
pub trait Command {
    /// Returns the endpoint path relative to the API root, e.g. `main/setPower`.
    fn path(&self) -> String;

    /// Returns the query parameter name and unencoded value, if any.
    fn query(&self) -> Option<(&'static str, String)>;

    /// Returns the path with the URL-encoded query appended.
    fn to_http_path(&self) -> String {
        match self.query() {
            Some((key, value)) => {
                format!("{}?{key}={}", self.path(), urlencoding::encode(&value))
            }
            None => self.path(),
        }
    }
}
