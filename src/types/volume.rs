// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Volume adjustment types.

use std::fmt;

/// A relative one-step volume change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeStep {
    /// Raise volume by one step.
    Up,
    /// Lower volume by one step.
    Down,
}

impl VolumeStep {
    /// Returns the value used by the MusicCast API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for VolumeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
