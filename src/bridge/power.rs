// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of the bridged receiver as seen from the CEC bus.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::DeviceConfig;
use crate::protocol::ZoneControl;
use crate::types::PowerState;

/// Owns the on/off state the bridge presents to the TV.
///
/// All mutation goes through [`update`](Self::update), which holds the state
/// lock for the whole transition: a standby arriving while a power-on is
/// still settling waits for it to finish, then powers off.
///
/// Receiver calls are best-effort. A failing call is logged and the
/// remaining steps still run; the new state is recorded either way.
pub struct PowerStateMachine<Z> {
    zone: Arc<Z>,
    config: DeviceConfig,
    is_on: Mutex<bool>,
}

impl<Z: ZoneControl> PowerStateMachine<Z> {
    /// Creates the machine in the off state.
    #[must_use]
    pub fn new(config: DeviceConfig, zone: Arc<Z>) -> Self {
        Self {
            zone,
            config,
            is_on: Mutex::new(false),
        }
    }

    /// Returns the current state.
    pub async fn is_on(&self) -> bool {
        *self.is_on.lock().await
    }

    /// Returns the configuration the machine applies.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Moves to the requested state, driving the receiver accordingly.
    ///
    /// Requesting the current state does nothing.
    pub async fn update(&self, requested_on: bool) {
        let mut is_on = self.is_on.lock().await;
        if *is_on == requested_on {
            tracing::trace!(is_on = requested_on, "Power state unchanged");
            return;
        }

        match PowerState::from(requested_on) {
            PowerState::On => self.power_on().await,
            PowerState::Standby => self.power_off().await,
        }

        *is_on = requested_on;
        tracing::debug!(is_on = requested_on, "Power state updated");
    }

    async fn power_on(&self) {
        tracing::info!(input = self.config.input_name(), "Turning receiver on");

        if let Err(e) = self.zone.set_power(PowerState::On).await {
            tracing::warn!(error = %e, "Failed to power on receiver");
        }
        if let Err(e) = self.zone.set_input(self.config.input_name()).await {
            tracing::warn!(error = %e, "Failed to select receiver input");
        }

        // Let the receiver apply its automatic volume before overriding it
        tokio::time::sleep(self.config.settle_delay()).await;

        if let Err(e) = self.zone.set_volume(self.config.target_volume()).await {
            tracing::warn!(error = %e, "Failed to set receiver volume");
        }
    }

    async fn power_off(&self) {
        let input = self.config.input_name();
        let owns_receiver = match self.zone.status().await {
            Ok(status) => {
                let active = status.is_input_active(input);
                if !active {
                    tracing::info!(
                        active_input = %status.input,
                        input,
                        "Not powering off receiver, TV is not the active input"
                    );
                }
                active
            }
            Err(e) => {
                tracing::warn!(error = %e, "Receiver status unavailable, powering off anyway");
                true
            }
        };

        if owns_receiver {
            tracing::info!("Putting receiver in standby");
            if let Err(e) = self.zone.set_power(PowerState::Standby).await {
                tracing::warn!(error = %e, "Failed to put receiver in standby");
            }
        }
    }
}
