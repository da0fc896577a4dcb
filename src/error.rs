// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the bridge.
//!
//! Nothing in the bridge core is fatal: these errors travel up to the point
//! where the core decides to log them and carry on. They are split by the
//! side they come from: the receiver's HTTP API ([`ProtocolError`],
//! [`ParseError`]), value constraints ([`ValueError`]) and the CEC bus
//! ([`BusError`]).

use thiserror::Error;

use crate::cec::{LogicalAddress, Opcode};

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the receiver.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a receiver response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred on the CEC bus.
    #[error("bus error: {0}")]
    Bus(#[from] BusError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
        /// The actual value that was provided.
        actual: u32,
    },

    /// The receiver reported a maximum volume of zero.
    #[error("maximum volume must be greater than zero")]
    ZeroMaxVolume,
}

/// Errors related to HTTP communication with the receiver.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The receiver answered with a non-success HTTP status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The receiver answered with a non-zero `response_code`.
    #[error("request rejected by receiver with response code {0}")]
    Rejected(u32),
}

/// Errors related to parsing receiver responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to the CEC bus.
#[derive(Debug, Error)]
pub enum BusError {
    /// The adapter refused or failed to send the frame.
    #[error("failed to transmit {opcode}: {reason}")]
    TransmitFailed {
        /// Opcode of the frame that could not be sent.
        opcode: Opcode,
        /// Adapter supplied reason.
        reason: String,
    },

    /// The transport cannot encode this opcode.
    #[error("opcode {0} is not supported by this transport")]
    UnsupportedOpcode(Opcode),

    /// The transport cannot address this device.
    #[error("address {0} is not supported by this transport")]
    UnsupportedAddress(LogicalAddress),

    /// The adapter could not be opened.
    #[error("failed to open CEC adapter: {0}")]
    Open(String),

    /// The transport worker is gone or did not answer in time.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
