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

//! The error taxonomy for load and replication requests.
//!
//! Every variant is recovered locally: the request simply does not proceed,
//! and the caller is notified through the return value and a log diagnostic.
//! Nothing in the core unwinds the tick loop.

use std::fmt;
use std::time::Duration;

/// Error type for rejected load and replication operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The requested key was empty or blank.
    EmptyKey,
    /// The requester is still on cooldown; the timer is not extended by
    /// a rejected attempt.
    CooldownActive {
        /// Time left until the next request will be accepted.
        remaining: Duration,
    },
    /// A non-authority participant attempted an authority-only mutation.
    NotAuthorized,
    /// A required external collaborator was never configured.
    MissingCollaborator(&'static str),
    /// The replication log is full; the broadcast was dropped, not queued.
    ReplicationCapExceeded,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::EmptyKey => write!(f, "Requested asset key is empty"),
            LoadError::CooldownActive { remaining } => {
                write!(
                    f,
                    "Load is on cooldown for another {:.1}s",
                    remaining.as_secs_f32()
                )
            }
            LoadError::NotAuthorized => {
                write!(f, "Only the session authority may perform this operation")
            }
            LoadError::MissingCollaborator(name) => {
                write!(f, "Required collaborator not configured: {name}")
            }
            LoadError::ReplicationCapExceeded => {
                write!(f, "Replication log is full; broadcast dropped")
            }
        }
    }
}

impl std::error::Error for LoadError {}

impl LoadError {
    /// Convenience constructor for a missing collaborator reference.
    pub fn missing(name: &'static str) -> Self {
        LoadError::MissingCollaborator(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_remaining_cooldown() {
        let err = LoadError::CooldownActive {
            remaining: Duration::from_secs_f32(2.5),
        };
        assert!(err.to_string().contains("2.5s"));
    }

    #[test]
    fn missing_constructor_names_the_collaborator() {
        let err = LoadError::missing("fetch lane");
        assert_eq!(err, LoadError::MissingCollaborator("fetch lane"));
        assert!(err.to_string().contains("fetch lane"));
    }
}
