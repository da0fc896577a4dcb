// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CEC transport backed by libcec.
//!
//! The libcec connection lives on a dedicated worker thread for its whole
//! life. Received commands are pushed into the [`CommandSender`] from
//! libcec's callback thread; transmissions are handed to the worker over a
//! channel and the caller waits a bounded time for the result.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cec_rs::{
    CecConnection, CecConnectionCfgBuilder, CecDatapacket, CecDeviceType, CecDeviceTypeVec,
    CecLogicalAddress, CecOpcode,
};

use crate::cec::{Bus, CecCommand, CommandSender, Datapacket, LogicalAddress, Opcode};
use crate::error::BusError;

/// Settings for [`LibCecBus`].
#[derive(Debug, Clone)]
pub struct LibCecConfig {
    device_name: String,
    transmit_timeout: Duration,
}

impl LibCecConfig {
    /// Default OSD name announced on the bus.
    pub const DEFAULT_DEVICE_NAME: &'static str = "MusicCast";
    /// Default time allowed for one transmission.
    pub const DEFAULT_TRANSMIT_TIMEOUT: Duration = Duration::from_secs(1);

    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            device_name: Self::DEFAULT_DEVICE_NAME.to_string(),
            transmit_timeout: Self::DEFAULT_TRANSMIT_TIMEOUT,
        }
    }

    /// Sets the OSD name announced on the bus.
    #[must_use]
    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    /// Sets the time allowed for one transmission.
    #[must_use]
    pub fn with_transmit_timeout(mut self, timeout: Duration) -> Self {
        self.transmit_timeout = timeout;
        self
    }
}

impl Default for LibCecConfig {
    fn default() -> Self {
        Self::new()
    }
}

struct TransmitRequest {
    command: CecCommand,
    reply: mpsc::SyncSender<Result<(), BusError>>,
}

enum WorkerMessage {
    Transmit(TransmitRequest),
    Close,
}

/// libcec transport registered as an audio system.
pub struct LibCecBus {
    requests: mpsc::Sender<WorkerMessage>,
    worker: Option<JoinHandle<()>>,
    reply_timeout: Duration,
}

impl LibCecBus {
    /// Opens the first detected adapter and starts forwarding received
    /// commands into `commands`.
    ///
    /// # Errors
    ///
    /// Returns `BusError::Open` if no adapter could be opened.
    pub fn open(config: LibCecConfig, commands: CommandSender) -> Result<Self, BusError> {
        let (request_tx, request_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        // Leave the worker room to hit libcec's own timeout first
        let reply_timeout = config.transmit_timeout * 2;

        let worker = thread::Builder::new()
            .name("libcec".to_string())
            .spawn(move || run_worker(&config, commands, &request_rx, &ready_tx))
            .map_err(|e| BusError::Open(e.to_string()))?;

        ready_rx
            .recv()
            .map_err(|_| BusError::Open("adapter worker exited during start-up".to_string()))??;

        Ok(Self {
            requests: request_tx,
            worker: Some(worker),
            reply_timeout,
        })
    }

    /// Closes the adapter and waits for the worker to exit.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.requests.send(WorkerMessage::Close);
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::error!("CEC worker thread panicked");
        }
    }
}

impl Drop for LibCecBus {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Bus for LibCecBus {
    fn transmit(&self, command: CecCommand) -> Result<(), BusError> {
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        self.requests
            .send(WorkerMessage::Transmit(TransmitRequest {
                command,
                reply: reply_tx,
            }))
            .map_err(|_| BusError::Unavailable("adapter worker has stopped".to_string()))?;

        reply_rx
            .recv_timeout(self.reply_timeout)
            .map_err(|e| BusError::Unavailable(e.to_string()))?
    }
}

fn run_worker(
    config: &LibCecConfig,
    commands: CommandSender,
    requests: &mpsc::Receiver<WorkerMessage>,
    ready: &mpsc::SyncSender<Result<(), BusError>>,
) {
    let connection = match open_connection(config, commands) {
        Ok(connection) => {
            let _ = ready.send(Ok(()));
            connection
        }
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    tracing::info!(device_name = %config.device_name, "Connected to CEC adapter");

    for message in requests {
        match message {
            WorkerMessage::Transmit(request) => {
                let result = to_libcec(&request.command, config.transmit_timeout).and_then(
                    |command| {
                        connection
                            .transmit(command)
                            .map_err(|e| BusError::TransmitFailed {
                                opcode: request.command.opcode,
                                reason: format!("{e:?}"),
                            })
                    },
                );
                let _ = request.reply.send(result);
            }
            WorkerMessage::Close => break,
        }
    }

    tracing::info!("Closing CEC adapter");
}

fn open_connection(
    config: &LibCecConfig,
    commands: CommandSender,
) -> Result<CecConnection, BusError> {
    CecConnectionCfgBuilder::default()
        .device_name(config.device_name.clone())
        .device_types(CecDeviceTypeVec::new(CecDeviceType::AudioSystem))
        .activate_source(false)
        .command_received_callback(Box::new(move |command: cec_rs::CecCommand| {
            let command = from_libcec(command);
            tracing::trace!(frame = %command, "Received CEC command");
            if commands.send(command).is_err() {
                tracing::debug!("Bridge is gone, dropping received CEC command");
            }
        }))
        .build()
        .map_err(|e| BusError::Open(e.to_string()))?
        .open()
        .map_err(|e| BusError::Open(format!("{e:?}")))
}

fn from_libcec(command: cec_rs::CecCommand) -> CecCommand {
    // Unknown (-1) maps to the unregistered/broadcast nibble
    let address = |raw: i32| LogicalAddress::from(u8::try_from(raw).unwrap_or(0x0F));
    let initiator = address(command.initiator as i32);
    let destination = address(command.destination as i32);
    #[allow(clippy::cast_possible_truncation)]
    let opcode = Opcode::from(command.opcode as u32 as u8);

    let operands = command.parameters.0.as_slice();
    let parameters = Datapacket::from_slice(operands).unwrap_or_else(|_| {
        tracing::warn!(len = operands.len(), "Truncating oversized CEC operands");
        Datapacket::from_slice(&operands[..Datapacket::CAPACITY]).unwrap_or_default()
    });

    CecCommand {
        initiator,
        destination,
        opcode,
        parameters,
    }
}

fn to_libcec(command: &CecCommand, timeout: Duration) -> Result<cec_rs::CecCommand, BusError> {
    let opcode = match command.opcode {
        Opcode::SetSystemAudioMode => CecOpcode::SetSystemAudioMode,
        Opcode::ReportAudioStatus => CecOpcode::ReportAudioStatus,
        Opcode::SystemAudioModeStatus => CecOpcode::SystemAudioModeStatus,
        Opcode::FeatureAbort => CecOpcode::FeatureAbort,
        other => return Err(BusError::UnsupportedOpcode(other)),
    };

    Ok(cec_rs::CecCommand {
        initiator: address_to_libcec(command.initiator)?,
        destination: address_to_libcec(command.destination)?,
        ack: false,
        eom: true,
        opcode,
        parameters: CecDatapacket(command.parameters.as_slice().iter().copied().collect()),
        opcode_set: true,
        transmit_timeout: timeout,
    })
}

fn address_to_libcec(address: LogicalAddress) -> Result<CecLogicalAddress, BusError> {
    match address {
        LogicalAddress::Tv => Ok(CecLogicalAddress::Tv),
        LogicalAddress::AudioSystem => Ok(CecLogicalAddress::Audiosystem),
        other => Err(BusError::UnsupportedAddress(other)),
    }
}
