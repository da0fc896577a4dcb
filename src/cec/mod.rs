// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The CEC side of the bridge.
//!
//! This module holds the value types exchanged with the bus transport and
//! the [`Bus`] trait the bridge transmits through. Inbound commands reach
//! the bridge as immutable [`CecCommand`] values sent over a
//! [`CommandSender`]; the transport owns the sending half, the bridge the
//! receiving half.
//!
//! With the `libcec` feature, [`LibCecBus`] provides a transport backed by
//! the system libcec library.

mod address;
mod audio_status;
mod frame;
#[cfg(feature = "libcec")]
mod libcec;
mod opcode;

use tokio::sync::mpsc;

pub use address::{LogicalAddress, PhysicalAddress};
pub use audio_status::{AudioStatus, MUTE_BITS, VOLUME_MASK};
pub use frame::{CecCommand, Datapacket};
#[cfg(feature = "libcec")]
pub use libcec::{LibCecBus, LibCecConfig};
pub use opcode::{Opcode, UserControlCode};

use crate::error::BusError;

/// Sending half of the inbound command channel, held by the transport.
pub type CommandSender = mpsc::UnboundedSender<CecCommand>;

/// Receiving half of the inbound command channel, consumed by the bridge.
pub type CommandReceiver = mpsc::UnboundedReceiver<CecCommand>;

/// Creates the channel a transport delivers received commands through.
#[must_use]
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    mpsc::unbounded_channel()
}

/// Outbound side of the CEC transport.
///
/// Implementations may block, but must return in bounded time. The bridge
/// calls `transmit` from tokio's blocking pool and never retries a failed
/// transmission.
pub trait Bus: Send + Sync {
    /// Sends one command on the bus.
    ///
    /// # Errors
    ///
    /// Returns `BusError` if the frame was not acknowledged or could not be
    /// handed to the adapter.
    fn transmit(&self, command: CecCommand) -> Result<(), BusError>;
}
