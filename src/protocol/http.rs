// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of [`ZoneControl`] for Yamaha MusicCast receivers.

use std::time::Duration;

use reqwest::Client;

use crate::command::{Command, ZoneCommand};
use crate::error::{Error, ProtocolError, Result};
use crate::protocol::{CommandResponse, ZoneControl};
use crate::response::{ApiResponse, ZoneStatus};
use crate::types::{PowerState, VolumeStep};

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for a MusicCast receiver reachable over HTTP.
///
/// # Examples
///
/// ```
/// use musiccast_cec::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.20")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(2));
///
/// assert_eq!(config.base_url(), "http://192.168.1.20:8080/YamahaExtendedControl/v1/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Root of the Yamaha Extended Control API.
    pub const API_ROOT: &'static str = "YamahaExtendedControl/v1/";

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// The host may carry its own `http://` prefix and `:port` suffix, in
    /// which case it is used verbatim.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the API base URL, always ending with `/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        let origin = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };
        let port_suffix = if self.port == Self::DEFAULT_PORT {
            String::new()
        } else {
            format!(":{}", self.port)
        };
        format!("{origin}{port_suffix}/{}", Self::API_ROOT)
    }

    /// Creates a [`MusicCastClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_client(self) -> std::result::Result<MusicCastClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "host is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(MusicCastClient {
            base_url: self.base_url(),
            client,
        })
    }
}

// ============================================================================
// MusicCastClient
// ============================================================================

/// HTTP client for the main zone of a MusicCast receiver.
///
/// # Examples
///
/// ```no_run
/// use musiccast_cec::protocol::{MusicCastClient, ZoneControl};
///
/// # async fn example() -> musiccast_cec::Result<()> {
/// let client = MusicCastClient::new("192.168.1.20")?;
/// let status = client.status().await?;
/// println!("volume {}/{}", status.volume, status.max_volume);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MusicCastClient {
    base_url: String,
    client: Client,
}

impl MusicCastClient {
    /// Creates a client for the specified host with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> std::result::Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, command: &impl Command) -> String {
        format!("{}{}", self.base_url, command.to_http_path())
    }

    /// Sends a command and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success HTTP status.
    pub async fn send_command<C: Command + Sync>(
        &self,
        command: &C,
    ) -> std::result::Result<CommandResponse, ProtocolError> {
        let url = self.build_url(command);

        tracing::debug!(url = %url, "Sending MusicCast request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received MusicCast response");

        Ok(CommandResponse::new(body))
    }

    /// Sends a command and checks the receiver accepted it.
    async fn execute(&self, command: &ZoneCommand) -> Result<CommandResponse> {
        let response = self.send_command(command).await?;
        let envelope: ApiResponse = response.parse()?;
        if !envelope.is_success() {
            return Err(ProtocolError::Rejected(envelope.response_code).into());
        }
        Ok(response)
    }
}

impl ZoneControl for MusicCastClient {
    async fn set_power(&self, state: PowerState) -> Result<()> {
        tracing::info!(power = %state, "Setting MusicCast power");
        self.execute(&ZoneCommand::SetPower(state)).await.map(drop)
    }

    async fn set_input(&self, input: &str) -> Result<()> {
        tracing::info!(input, "Setting MusicCast input");
        self.execute(&ZoneCommand::SetInput(input.to_string()))
            .await
            .map(drop)
    }

    async fn set_volume(&self, volume: u32) -> Result<()> {
        tracing::info!(volume, "Setting MusicCast volume");
        self.execute(&ZoneCommand::SetVolume(volume)).await.map(drop)
    }

    async fn step_volume(&self, step: VolumeStep) -> Result<()> {
        tracing::debug!(step = %step, "Stepping MusicCast volume");
        self.execute(&ZoneCommand::StepVolume(step)).await.map(drop)
    }

    async fn status(&self) -> Result<ZoneStatus> {
        let response = self.execute(&ZoneCommand::GetStatus).await?;
        response.parse().map_err(Error::Parse)
    }
}
