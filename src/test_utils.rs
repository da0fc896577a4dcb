// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recording fakes for the zone and bus ports.

use parking_lot::Mutex;

use crate::cec::{Bus, CecCommand};
use crate::error::{BusError, ProtocolError, Result};
use crate::protocol::ZoneControl;
use crate::response::ZoneStatus;
use crate::types::{PowerState, VolumeStep, ZonePower};

/// A call observed by [`RecordingZone`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneCall {
    SetPower(PowerState),
    SetInput(String),
    SetVolume(u32),
    StepVolume(VolumeStep),
    Status,
}

#[derive(Default)]
pub struct RecordingZone {
    calls: Mutex<Vec<ZoneCall>>,
    status: Mutex<Option<ZoneStatus>>,
    fail_setters: bool,
}

impl RecordingZone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every setter records its call and then fails.
    pub fn failing() -> Self {
        Self {
            fail_setters: true,
            ..Self::default()
        }
    }

    pub fn with_status(self, status: ZoneStatus) -> Self {
        *self.status.lock() = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<ZoneCall> {
        self.calls.lock().clone()
    }

    /// Calls other than status reads.
    pub fn commands(&self) -> Vec<ZoneCall> {
        self.calls()
            .into_iter()
            .filter(|call| *call != ZoneCall::Status)
            .collect()
    }

    fn record(&self, call: ZoneCall) -> Result<()> {
        self.calls.lock().push(call);
        if self.fail_setters {
            return Err(ProtocolError::ConnectionFailed("unreachable".to_string()).into());
        }
        Ok(())
    }
}

impl ZoneControl for RecordingZone {
    async fn set_power(&self, state: PowerState) -> Result<()> {
        self.record(ZoneCall::SetPower(state))
    }

    async fn set_input(&self, input: &str) -> Result<()> {
        self.record(ZoneCall::SetInput(input.to_string()))
    }

    async fn set_volume(&self, volume: u32) -> Result<()> {
        self.record(ZoneCall::SetVolume(volume))
    }

    async fn step_volume(&self, step: VolumeStep) -> Result<()> {
        self.record(ZoneCall::StepVolume(step))
    }

    async fn status(&self) -> Result<ZoneStatus> {
        self.calls.lock().push(ZoneCall::Status);
        self.status
            .lock()
            .clone()
            .ok_or_else(|| ProtocolError::ConnectionFailed("no status".to_string()).into())
    }
}

pub fn zone_status(input: &str, volume: u32, max_volume: u32, mute: bool) -> ZoneStatus {
    ZoneStatus {
        power: ZonePower::On,
        sleep: 0,
        volume,
        max_volume,
        mute,
        input: input.to_string(),
    }
}

#[derive(Default)]
pub struct RecordingBus {
    sent: Mutex<Vec<CecCommand>>,
    fail: bool,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every frame and reports it as not acknowledged.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<CecCommand> {
        self.sent.lock().clone()
    }
}

impl Bus for RecordingBus {
    fn transmit(&self, command: CecCommand) -> std::result::Result<(), BusError> {
        self.sent.lock().push(command);
        if self.fail {
            return Err(BusError::TransmitFailed {
                opcode: command.opcode,
                reason: "no ack".to_string(),
            });
        }
        Ok(())
    }
}
