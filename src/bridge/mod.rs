// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The protocol bridge.
//!
//! ```text
//! Bus transport ──CecCommand──▶ Bridge::run ──spawn──▶ CommandTranslator::handle
//!                                                         ├─▶ PowerStateMachine ─▶ ZoneControl
//!                                                         ├─▶ ZoneControl
//!                                                         └─▶ Bus::transmit (replies)
//! ```
//!
//! Each received command is handled in its own task, so the settle delay of
//! a power-on never holds up a volume key or an audio status request.

mod power;
mod translator;

use std::sync::Arc;

use tokio::task::JoinSet;

pub use power::PowerStateMachine;
pub use translator::CommandTranslator;

use crate::cec::{Bus, CommandReceiver};
use crate::config::DeviceConfig;
use crate::protocol::ZoneControl;

/// Drives a [`CommandTranslator`] from the transport's command channel.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use musiccast_cec::{Bridge, DeviceConfig};
/// use musiccast_cec::cec::{Bus, CecCommand, command_channel};
/// use musiccast_cec::error::BusError;
/// use musiccast_cec::protocol::MusicCastClient;
///
/// struct LoggingBus;
///
/// impl Bus for LoggingBus {
///     fn transmit(&self, command: CecCommand) -> Result<(), BusError> {
///         println!("{command}");
///         Ok(())
///     }
/// }
///
/// # async fn example() -> musiccast_cec::Result<()> {
/// let config = DeviceConfig::new("hdmi1", "192.168.1.20");
/// let zone = Arc::new(config.http_config().into_client()?);
/// let bridge = Bridge::new(config, zone, Arc::new(LoggingBus));
///
/// let (sender, receiver) = command_channel();
/// // hand `sender` to the transport...
/// # drop(sender);
/// bridge.run(receiver).await;
/// # Ok(())
/// # }
/// ```
pub struct Bridge<Z, B> {
    translator: Arc<CommandTranslator<Z, B>>,
}

impl<Z, B> Bridge<Z, B>
where
    Z: ZoneControl + 'static,
    B: Bus + 'static,
{
    /// Creates a bridge with the power state off.
    #[must_use]
    pub fn new(config: DeviceConfig, zone: Arc<Z>, bus: Arc<B>) -> Self {
        Self {
            translator: Arc::new(CommandTranslator::new(config, zone, bus)),
        }
    }

    /// Returns the translator commands are dispatched to.
    #[must_use]
    pub fn translator(&self) -> &Arc<CommandTranslator<Z, B>> {
        &self.translator
    }

    /// Handles commands until the channel closes, then waits for the
    /// commands still in flight.
    pub async fn run(&self, mut commands: CommandReceiver) {
        let mut in_flight = JoinSet::new();

        while let Some(command) = commands.recv().await {
            tracing::debug!(frame = %command, opcode = %command.opcode, "Received CEC command");

            let translator = Arc::clone(&self.translator);
            in_flight.spawn(async move { translator.handle(&command).await });

            while let Some(result) = in_flight.try_join_next() {
                log_task_result(result);
            }
        }

        tracing::debug!(pending = in_flight.len(), "Command channel closed");
        while let Some(result) = in_flight.join_next().await {
            log_task_result(result);
        }
    }
}

fn log_task_result(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        tracing::error!(error = %e, "Command handler task failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cec::{CecCommand, Datapacket, LogicalAddress, Opcode, command_channel};
    use crate::test_utils::{RecordingBus, RecordingZone, ZoneCall, zone_status};
    use crate::types::{PowerState, VolumeStep};

    fn from_tv(opcode: Opcode, operands: &[u8]) -> CecCommand {
        CecCommand::new(LogicalAddress::Tv, LogicalAddress::AudioSystem, opcode)
            .with_parameters(Datapacket::from_slice(operands).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn settle_delay_does_not_block_other_commands() {
        let zone = Arc::new(RecordingZone::new().with_status(zone_status("hdmi1", 50, 100, false)));
        let bus = Arc::new(RecordingBus::new());
        let bridge = Bridge::new(
            DeviceConfig::new("hdmi1", "192.168.1.20"),
            Arc::clone(&zone),
            Arc::clone(&bus),
        );

        let (tx, rx) = command_channel();
        tx.send(from_tv(Opcode::SystemAudioModeRequest, &[0x00, 0x10]))
            .unwrap();
        tx.send(from_tv(Opcode::UserControlPressed, &[0x41])).unwrap();
        tx.send(from_tv(Opcode::GiveAudioStatus, &[])).unwrap();
        drop(tx);

        bridge.run(rx).await;

        let calls = zone.calls();
        let volume_step = calls
            .iter()
            .position(|c| *c == ZoneCall::StepVolume(VolumeStep::Up))
            .unwrap();
        let set_volume = calls
            .iter()
            .position(|c| *c == ZoneCall::SetVolume(90))
            .unwrap();
        assert!(volume_step < set_volume);
        assert!(calls.contains(&ZoneCall::SetPower(PowerState::On)));
        assert!(bridge.translator().power().is_on().await);
        assert_eq!(bus.sent().len(), 2);
    }

    /// Bus whose transmit blocks until the test releases it, like an adapter
    /// waiting for an acknowledgement that never comes.
    struct StalledBus {
        release: parking_lot::Mutex<std::sync::mpsc::Receiver<()>>,
    }

    impl Bus for StalledBus {
        fn transmit(&self, _command: CecCommand) -> Result<(), crate::error::BusError> {
            let _ = self.release.lock().recv_timeout(std::time::Duration::from_secs(5));
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn stalled_transmit_does_not_block_other_commands() {
        let (release_tx, release_rx) = std::sync::mpsc::channel();
        let zone = Arc::new(RecordingZone::new().with_status(zone_status("hdmi1", 50, 100, false)));
        let bridge = Bridge::new(
            DeviceConfig::new("hdmi1", "192.168.1.20"),
            Arc::clone(&zone),
            Arc::new(StalledBus {
                release: parking_lot::Mutex::new(release_rx),
            }),
        );

        let (tx, rx) = command_channel();
        let running = tokio::spawn(async move { bridge.run(rx).await });

        tx.send(from_tv(Opcode::GiveAudioStatus, &[])).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        tx.send(from_tv(Opcode::UserControlPressed, &[0x41])).unwrap();

        let handled = tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while !zone.calls().contains(&ZoneCall::StepVolume(VolumeStep::Up)) {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        })
        .await;

        release_tx.send(()).unwrap();
        drop(tx);
        running.await.unwrap();
        assert!(handled.is_ok(), "volume key waited for the stalled transmit");
    }

    #[tokio::test]
    async fn run_returns_when_channel_closes() {
        let bridge = Bridge::new(
            DeviceConfig::new("hdmi1", "192.168.1.20"),
            Arc::new(RecordingZone::new()),
            Arc::new(RecordingBus::new()),
        );
        let (tx, rx) = command_channel();
        drop(tx);

        bridge.run(rx).await;
        assert!(!bridge.translator().power().is_on().await);
    }
}
