// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// A unique identifier for one participant in the shared session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Creates a new, random (version 4) `ParticipantId`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Query interface onto the host session's ownership state.
///
/// The check is cooperative, not cryptographic: a well-behaved participant
/// consults it before every authority-only mutation, and the host layer is
/// responsible for actual enforcement.
pub trait SessionAuthority: Send + Sync {
    /// The local participant's identity.
    fn local_participant(&self) -> ParticipantId;

    /// Returns `true` while the local participant holds write permission
    /// over replicated state.
    fn is_authority(&self) -> bool;
}

/// A `SessionAuthority` backed by a flag, for deployments without ownership
/// election and for tests.
#[derive(Debug)]
pub struct FixedAuthority {
    local: ParticipantId,
    authority: AtomicBool,
}

impl FixedAuthority {
    /// Creates an authority handle with the given initial permission.
    pub fn new(authority: bool) -> Self {
        Self {
            local: ParticipantId::new(),
            authority: AtomicBool::new(authority),
        }
    }

    /// Updates the permission flag, e.g. after the host re-elects an owner.
    pub fn set_authority(&self, authority: bool) {
        self.authority.store(authority, Ordering::Relaxed);
    }
}

impl SessionAuthority for FixedAuthority {
    fn local_participant(&self) -> ParticipantId {
        self.local
    }

    fn is_authority(&self) -> bool {
        self.authority.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_authority_is_togglable() {
        let auth = FixedAuthority::new(false);
        assert!(!auth.is_authority());
        auth.set_authority(true);
        assert!(auth.is_authority());
    }
}
