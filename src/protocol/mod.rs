// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control of the receiver's main zone.
//!
//! The bridge talks to the receiver exclusively through [`ZoneControl`].
//! [`MusicCastClient`] implements it over the Yamaha Extended Control HTTP
//! API; tests substitute their own recorders.

mod http;

use std::future::Future;

pub use http::{HttpConfig, MusicCastClient};

use crate::error::{ParseError, Result};
use crate::response::ZoneStatus;
use crate::types::{PowerState, VolumeStep};

/// Raw body of a receiver response.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    body: String,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> std::result::Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// Control surface of the receiver's main zone.
///
/// Setters are fire-and-forget from the bridge's point of view: it logs an
/// `Err` and moves on. [`status`](Self::status) returning `Err` means no
/// snapshot is available.
pub trait ZoneControl: Send + Sync {
    /// Switches the zone on or to standby.
    fn set_power(&self, state: PowerState) -> impl Future<Output = Result<()>> + Send;

    /// Selects the active input.
    fn set_input(&self, input: &str) -> impl Future<Output = Result<()>> + Send;

    /// Sets an absolute volume.
    fn set_volume(&self, volume: u32) -> impl Future<Output = Result<()>> + Send;

    /// Changes the volume by one step.
    fn step_volume(&self, step: VolumeStep) -> impl Future<Output = Result<()>> + Send;

    /// Fetches a fresh status snapshot.
    fn status(&self) -> impl Future<Output = Result<ZoneStatus>> + Send;

    /// Raises the volume by one step.
    fn volume_up(&self) -> impl Future<Output = Result<()>> + Send {
        self.step_volume(VolumeStep::Up)
    }

    /// Lowers the volume by one step.
    fn volume_down(&self) -> impl Future<Output = Result<()>> + Send {
        self.step_volume(VolumeStep::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ApiResponse;

    #[test]
    fn command_response_parse() {
        let response = CommandResponse::new(r#"{"response_code": 0}"#.to_string());
        let parsed: ApiResponse = response.parse().unwrap();
        assert!(parsed.is_success());
        assert_eq!(response.body(), r#"{"response_code": 0}"#);
    }

    #[test]
    fn command_response_parse_invalid_json() {
        let response = CommandResponse::new("<html>".to_string());
        assert!(matches!(
            response.parse::<ApiResponse>(),
            Err(ParseError::Json(_))
        ));
    }
}
