// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Translation of received CEC commands into receiver actions and replies.

use std::sync::Arc;

use crate::bridge::PowerStateMachine;
use crate::cec::{
    AudioStatus, Bus, CecCommand, Datapacket, LogicalAddress, Opcode, PhysicalAddress,
    UserControlCode,
};
use crate::config::DeviceConfig;
use crate::protocol::ZoneControl;

/// Reacts to one CEC command at a time on behalf of the receiver.
///
/// | Opcode | Reaction |
/// |--------|----------|
/// | `<System Audio Mode Request>` | power on (operands present) or off (none), reply `<Set System Audio Mode>` |
/// | `<User Control Pressed>` | volume up / down |
/// | `<Standby>` | power off |
/// | `<Give Audio Status>` | reply `<Report Audio Status>` from a fresh zone status |
///
/// Every other opcode is ignored. Failures are logged and never change the
/// bridge state.
pub struct CommandTranslator<Z, B> {
    power: PowerStateMachine<Z>,
    zone: Arc<Z>,
    bus: Arc<B>,
}

impl<Z: ZoneControl, B: Bus + 'static> CommandTranslator<Z, B> {
    /// Creates a translator with the power state off.
    #[must_use]
    pub fn new(config: DeviceConfig, zone: Arc<Z>, bus: Arc<B>) -> Self {
        Self {
            power: PowerStateMachine::new(config, Arc::clone(&zone)),
            zone,
            bus,
        }
    }

    /// Returns the power state machine.
    #[must_use]
    pub fn power(&self) -> &PowerStateMachine<Z> {
        &self.power
    }

    /// Handles one received command.
    pub async fn handle(&self, command: &CecCommand) {
        match command.opcode {
            Opcode::SystemAudioModeRequest => {
                self.system_audio_mode_request(&command.parameters).await;
            }
            Opcode::UserControlPressed => self.user_control_pressed(&command.parameters).await,
            Opcode::Standby => {
                tracing::info!(initiator = %command.initiator, "Standby requested");
                self.power.update(false).await;
            }
            Opcode::GiveAudioStatus => {
                tracing::info!("Requested to report audio status");
                self.report_audio_status().await;
            }
            other => tracing::trace!(opcode = %other, "Ignoring CEC command"),
        }
    }

    async fn system_audio_mode_request(&self, parameters: &Datapacket) {
        // Present for protocol completeness, routing does not depend on it
        let physical_address = PhysicalAddress::from_le_bytes(parameters.get(0), parameters.get(1));
        let requested_on = !parameters.is_empty();

        tracing::info!(
            %physical_address,
            requested_on,
            "Got system audio mode request"
        );

        self.power.update(requested_on).await;

        self.transmit(
            CecCommand::new(
                LogicalAddress::AudioSystem,
                LogicalAddress::Tv,
                Opcode::SetSystemAudioMode,
            )
            .with_operand(u8::from(requested_on)),
        )
        .await;
    }

    async fn user_control_pressed(&self, parameters: &Datapacket) {
        let result = match UserControlCode::from(parameters.get(0)) {
            UserControlCode::VolumeUp => self.zone.volume_up().await,
            UserControlCode::VolumeDown => self.zone.volume_down().await,
            other => {
                tracing::trace!(keycode = other.as_u8(), "Ignoring key press");
                return;
            }
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to change receiver volume");
        }
    }

    async fn report_audio_status(&self) {
        let status = match self.zone.status().await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(error = %e, "Error while retrieving MusicCast status");
                return;
            }
        };

        let audio_status = match AudioStatus::from_zone_status(&status) {
            Ok(audio_status) => audio_status,
            Err(e) => {
                tracing::error!(error = %e, "Cannot encode audio status");
                return;
            }
        };

        tracing::debug!(
            volume = audio_status.volume(),
            muted = audio_status.is_muted(),
            "Reporting audio status"
        );

        self.transmit(
            CecCommand::new(
                LogicalAddress::AudioSystem,
                LogicalAddress::Tv,
                Opcode::ReportAudioStatus,
            )
            .with_operand(audio_status.to_byte()),
        )
        .await;
    }

    /// Transmits on the blocking pool; a transport waiting for an
    /// acknowledgement must not hold an async worker.
    async fn transmit(&self, command: CecCommand) {
        tracing::debug!(frame = %command, "Transmitting CEC command");
        let bus = Arc::clone(&self.bus);
        match tokio::task::spawn_blocking(move || bus.transmit(command)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Failed to transmit the command"),
            Err(e) => tracing::error!(error = %e, "CEC transmit task failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingBus, RecordingZone, ZoneCall, zone_status};
    use crate::types::{PowerState, VolumeStep};

    struct Fixture {
        zone: Arc<RecordingZone>,
        bus: Arc<RecordingBus>,
        translator: CommandTranslator<RecordingZone, RecordingBus>,
    }

    fn fixture_with(zone: RecordingZone, bus: RecordingBus) -> Fixture {
        let zone = Arc::new(zone);
        let bus = Arc::new(bus);
        let translator = CommandTranslator::new(
            DeviceConfig::new("hdmi1", "192.168.1.20").with_target_volume(70),
            Arc::clone(&zone),
            Arc::clone(&bus),
        );
        Fixture {
            zone,
            bus,
            translator,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(RecordingZone::new(), RecordingBus::new())
    }

    fn from_tv(opcode: Opcode, operands: &[u8]) -> CecCommand {
        CecCommand::new(LogicalAddress::Tv, LogicalAddress::AudioSystem, opcode)
            .with_parameters(Datapacket::from_slice(operands).unwrap())
    }

    fn reply(opcode: Opcode, operand: u8) -> CecCommand {
        CecCommand::new(LogicalAddress::AudioSystem, LogicalAddress::Tv, opcode).with_operand(operand)
    }

    #[tokio::test(start_paused = true)]
    async fn system_audio_mode_request_with_address_turns_on() {
        let f = fixture();
        f.translator
            .handle(&from_tv(Opcode::SystemAudioModeRequest, &[0x00, 0x10]))
            .await;

        assert!(f.translator.power().is_on().await);
        assert_eq!(
            f.zone.calls(),
            vec![
                ZoneCall::SetPower(PowerState::On),
                ZoneCall::SetInput("hdmi1".to_string()),
                ZoneCall::SetVolume(70),
            ]
        );
        assert_eq!(f.bus.sent(), vec![reply(Opcode::SetSystemAudioMode, 0x01)]);
    }

    #[tokio::test(start_paused = true)]
    async fn system_audio_mode_request_ignores_operand_values() {
        let f = fixture();
        f.translator
            .handle(&from_tv(Opcode::SystemAudioModeRequest, &[0x00]))
            .await;

        assert!(f.translator.power().is_on().await);
        assert_eq!(f.bus.sent(), vec![reply(Opcode::SetSystemAudioMode, 0x01)]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_system_audio_mode_request_turns_off() {
        let f = fixture_with(
            RecordingZone::new().with_status(zone_status("hdmi1", 40, 161, false)),
            RecordingBus::new(),
        );
        f.translator
            .handle(&from_tv(Opcode::SystemAudioModeRequest, &[0x00, 0x10]))
            .await;
        f.translator
            .handle(&from_tv(Opcode::SystemAudioModeRequest, &[]))
            .await;

        assert!(!f.translator.power().is_on().await);
        assert_eq!(
            f.zone.commands().last(),
            Some(&ZoneCall::SetPower(PowerState::Standby))
        );
        assert_eq!(
            f.bus.sent(),
            vec![
                reply(Opcode::SetSystemAudioMode, 0x01),
                reply(Opcode::SetSystemAudioMode, 0x00),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn empty_system_audio_mode_request_while_off_still_replies() {
        let f = fixture();
        f.translator
            .handle(&from_tv(Opcode::SystemAudioModeRequest, &[]))
            .await;

        assert!(f.zone.calls().is_empty());
        assert_eq!(f.bus.sent(), vec![reply(Opcode::SetSystemAudioMode, 0x00)]);
    }

    #[tokio::test]
    async fn volume_up_key() {
        let f = fixture();
        f.translator
            .handle(&from_tv(Opcode::UserControlPressed, &[0x41]))
            .await;

        assert_eq!(f.zone.calls(), vec![ZoneCall::StepVolume(VolumeStep::Up)]);
        assert!(f.bus.sent().is_empty());
    }

    #[tokio::test]
    async fn volume_down_key() {
        let f = fixture();
        f.translator
            .handle(&from_tv(Opcode::UserControlPressed, &[0x42]))
            .await;

        assert_eq!(f.zone.calls(), vec![ZoneCall::StepVolume(VolumeStep::Down)]);
    }

    #[tokio::test]
    async fn other_keys_ignored() {
        let f = fixture();
        for keycode in [0x00, 0x43, 0x6B] {
            f.translator
                .handle(&from_tv(Opcode::UserControlPressed, &[keycode]))
                .await;
        }

        assert!(f.zone.calls().is_empty());
    }

    #[tokio::test]
    async fn volume_key_failure_is_swallowed() {
        let f = fixture_with(RecordingZone::failing(), RecordingBus::new());
        f.translator
            .handle(&from_tv(Opcode::UserControlPressed, &[0x41]))
            .await;

        assert_eq!(f.zone.calls(), vec![ZoneCall::StepVolume(VolumeStep::Up)]);
    }

    #[tokio::test(start_paused = true)]
    async fn standby_turns_off() {
        let f = fixture_with(
            RecordingZone::new().with_status(zone_status("hdmi1", 40, 161, false)),
            RecordingBus::new(),
        );
        f.translator.power().update(true).await;
        f.translator
            .handle(&CecCommand::new(
                LogicalAddress::Tv,
                LogicalAddress::Broadcast,
                Opcode::Standby,
            ))
            .await;

        assert!(!f.translator.power().is_on().await);
        assert_eq!(
            f.zone.calls()[3..].to_vec(),
            vec![ZoneCall::Status, ZoneCall::SetPower(PowerState::Standby)]
        );
        assert!(f.bus.sent().is_empty());
    }

    #[tokio::test]
    async fn give_audio_status_reports_scaled_volume() {
        let f = fixture_with(
            RecordingZone::new().with_status(zone_status("hdmi1", 50, 100, false)),
            RecordingBus::new(),
        );
        f.translator
            .handle(&from_tv(Opcode::GiveAudioStatus, &[]))
            .await;

        assert_eq!(f.bus.sent(), vec![reply(Opcode::ReportAudioStatus, 0x32)]);
    }

    #[tokio::test]
    async fn give_audio_status_reports_mute() {
        let f = fixture_with(
            RecordingZone::new().with_status(zone_status("hdmi1", 100, 100, true)),
            RecordingBus::new(),
        );
        f.translator
            .handle(&from_tv(Opcode::GiveAudioStatus, &[]))
            .await;

        assert_eq!(f.bus.sent(), vec![reply(Opcode::ReportAudioStatus, 0xF4)]);
    }

    #[tokio::test]
    async fn give_audio_status_reads_fresh_status_each_time() {
        let f = fixture_with(
            RecordingZone::new().with_status(zone_status("hdmi1", 50, 100, false)),
            RecordingBus::new(),
        );
        f.translator
            .handle(&from_tv(Opcode::GiveAudioStatus, &[]))
            .await;
        f.translator
            .handle(&from_tv(Opcode::GiveAudioStatus, &[]))
            .await;

        assert_eq!(f.zone.calls(), vec![ZoneCall::Status, ZoneCall::Status]);
        assert_eq!(f.bus.sent().len(), 2);
    }

    #[tokio::test]
    async fn give_audio_status_without_status_sends_nothing() {
        let f = fixture();
        f.translator
            .handle(&from_tv(Opcode::GiveAudioStatus, &[]))
            .await;

        assert_eq!(f.zone.calls(), vec![ZoneCall::Status]);
        assert!(f.bus.sent().is_empty());
    }

    #[tokio::test]
    async fn give_audio_status_with_zero_max_volume_sends_nothing() {
        let f = fixture_with(
            RecordingZone::new().with_status(zone_status("hdmi1", 10, 0, false)),
            RecordingBus::new(),
        );
        f.translator
            .handle(&from_tv(Opcode::GiveAudioStatus, &[]))
            .await;

        assert!(f.bus.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn transmit_failure_keeps_state_and_next_command_works() {
        let f = fixture_with(
            RecordingZone::new().with_status(zone_status("hdmi1", 50, 100, false)),
            RecordingBus::failing(),
        );
        f.translator
            .handle(&from_tv(Opcode::SystemAudioModeRequest, &[0x00, 0x10]))
            .await;
        assert!(f.translator.power().is_on().await);

        f.translator
            .handle(&from_tv(Opcode::GiveAudioStatus, &[]))
            .await;
        assert_eq!(
            f.bus.sent(),
            vec![
                reply(Opcode::SetSystemAudioMode, 0x01),
                reply(Opcode::ReportAudioStatus, 0x32),
            ]
        );
    }

    #[tokio::test]
    async fn unrelated_opcodes_ignored() {
        let f = fixture();
        for opcode in [
            Opcode::ActiveSource,
            Opcode::UserControlReleased,
            Opcode::GiveDevicePowerStatus,
            Opcode::Other(0xA0),
        ] {
            f.translator.handle(&from_tv(opcode, &[0x41])).await;
        }

        assert!(f.zone.calls().is_empty());
        assert!(f.bus.sent().is_empty());
    }
}
