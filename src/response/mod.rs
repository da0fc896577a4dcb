// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for MusicCast JSON responses.
//!
//! Every MusicCast endpoint answers with a JSON object carrying a
//! `response_code`; zero means success. Query endpoints add their payload
//! fields next to it.

mod zone_status;

use serde::Deserialize;

pub use zone_status::ZoneStatus;

/// The envelope shared by every MusicCast response.
///
/// # Examples
///
/// ```
/// use musiccast_cec::response::ApiResponse;
///
/// let response: ApiResponse = serde_json::from_str(r#"{"response_code": 0}"#).unwrap();
/// assert!(response.is_success());
/// ```
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    /// Result code, `0` on success.
    pub response_code: u32,
}

impl ApiResponse {
    /// Returns `true` if the receiver accepted the request.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.response_code == 0
    }
}
