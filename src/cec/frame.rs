// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CEC command frames.

use std::fmt;

use crate::cec::{LogicalAddress, Opcode};
use crate::error::ValueError;

/// Operand payload of a CEC command.
///
/// Fixed capacity with an explicit size, like the adapter's own packet type.
/// Reading past the size yields `0`, matching the zero-initialised buffer
/// the adapter hands out.
///
/// # Examples
///
/// ```
/// use musiccast_cec::cec::Datapacket;
///
/// let packet = Datapacket::from_slice(&[0x00, 0x10]).unwrap();
/// assert_eq!(packet.len(), 2);
/// assert_eq!(packet.get(1), 0x10);
/// assert_eq!(packet.get(5), 0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Datapacket {
    data: [u8; Self::CAPACITY],
    size: u8,
}

impl Datapacket {
    /// Maximum number of operand bytes.
    pub const CAPACITY: usize = 64;

    /// Creates an empty packet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: [0; Self::CAPACITY],
            size: 0,
        }
    }

    /// Creates a packet holding a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `bytes` exceeds [`Self::CAPACITY`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        if bytes.len() > Self::CAPACITY {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u32::try_from(Self::CAPACITY).unwrap_or(u32::MAX),
                actual: u32::try_from(bytes.len()).unwrap_or(u32::MAX),
            });
        }
        let mut packet = Self::new();
        packet.data[..bytes.len()].copy_from_slice(bytes);
        // Bounded by CAPACITY above
        #[allow(clippy::cast_possible_truncation)]
        {
            packet.size = bytes.len() as u8;
        }
        Ok(packet)
    }

    /// Number of operand bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size as usize
    }

    /// Returns `true` if there are no operands.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the byte at `index`, or `0` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> u8 {
        if index < self.len() {
            self.data[index]
        } else {
            0
        }
    }

    /// Returns the operands as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len()]
    }
}

impl Default for Datapacket {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Datapacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A CEC command as delivered by, or handed to, the bus transport.
///
/// # Examples
///
/// ```
/// use musiccast_cec::cec::{CecCommand, LogicalAddress, Opcode};
///
/// let reply = CecCommand::new(LogicalAddress::AudioSystem, LogicalAddress::Tv, Opcode::SetSystemAudioMode)
///     .with_operand(1);
/// assert_eq!(reply.parameters.as_slice(), &[1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CecCommand {
    /// Sending device.
    pub initiator: LogicalAddress,
    /// Receiving device.
    pub destination: LogicalAddress,
    /// Operation.
    pub opcode: Opcode,
    /// Operands.
    pub parameters: Datapacket,
}

impl CecCommand {
    /// Creates a command without operands.
    #[must_use]
    pub const fn new(initiator: LogicalAddress, destination: LogicalAddress, opcode: Opcode) -> Self {
        Self {
            initiator,
            destination,
            opcode,
            parameters: Datapacket::new(),
        }
    }

    /// Sets the operands.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Datapacket) -> Self {
        self.parameters = parameters;
        self
    }

    /// Appends one operand byte. Bytes beyond capacity are dropped.
    #[must_use]
    pub fn with_operand(mut self, byte: u8) -> Self {
        let len = self.parameters.len();
        if len < Datapacket::CAPACITY {
            self.parameters.data[len] = byte;
            self.parameters.size += 1;
        }
        self
    }
}

impl fmt::Display for CecCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:X}{:X}:{:02x}",
            self.initiator.as_u8(),
            self.destination.as_u8(),
            self.opcode.as_u8()
        )?;
        for byte in self.parameters.as_slice() {
            write!(f, ":{byte:02x}")?;
        }
        Ok(())
    }
}
