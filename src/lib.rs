// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `musiccast-cec` - make a Yamaha MusicCast receiver behave like a
//! CEC-native amplifier.
//!
//! The TV and the receiver share an HDMI-CEC bus, but the receiver is only
//! controllable over its HTTP API. This crate sits on the bus as the audio
//! system and translates what the TV asks for into HTTP calls:
//!
//! - **System audio mode**: power the receiver on (input + volume) or off,
//!   and acknowledge the mode to the TV
//! - **Standby**: power the receiver off, unless another source is using it
//! - **Volume keys**: step the receiver volume
//! - **Audio status**: report volume and mute so the TV can show them
//!
//! # Layout
//!
//! - [`bridge`]: the power state machine, the command translator and the
//!   run loop
//! - [`cec`]: CEC value types and the [`Bus`](cec::Bus) port
//! - [`protocol`]: the [`ZoneControl`](protocol::ZoneControl) port and its
//!   MusicCast HTTP implementation
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use musiccast_cec::{Bridge, DeviceConfig};
//! use musiccast_cec::cec::{LibCecBus, LibCecConfig, command_channel};
//!
//! #[tokio::main]
//! async fn main() -> musiccast_cec::Result<()> {
//!     let config = DeviceConfig::new("hdmi1", "192.168.1.20").with_target_volume(80);
//!     let zone = Arc::new(config.http_config().into_client()?);
//!
//!     let (sender, receiver) = command_channel();
//!     let bus = Arc::new(LibCecBus::open(LibCecConfig::new(), sender)?);
//!
//!     Bridge::new(config, zone, bus).run(receiver).await;
//!     Ok(())
//! }
//! ```
//!
//! The example needs the `libcec` feature and the system libcec library.

pub mod bridge;
pub mod cec;
pub mod command;
mod config;
pub mod error;
pub mod protocol;
pub mod response;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use bridge::{Bridge, CommandTranslator, PowerStateMachine};
pub use config::DeviceConfig;
pub use error::{BusError, Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::{HttpConfig, MusicCastClient, ZoneControl};
pub use response::ZoneStatus;
pub use types::{PowerState, VolumeStep, ZonePower};
