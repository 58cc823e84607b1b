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

use agora_core::asset::FetchKey;
use serde::{Deserialize, Serialize};

/// Default maximum number of keys the log will hold.
pub const DEFAULT_URL_CAP: usize = 50;

/// Result of attempting to append a key to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The key was appended and the log marked dirty.
    Appended,
    /// The key was already present; the log is unchanged.
    Duplicate,
    /// The log is full; the key was dropped, not queued. Nothing is evicted.
    CapReached,
}

/// The wire form of the log: an opaque list-of-keys-plus-count structure the
/// host transport replicates verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationSnapshot {
    /// Loaded asset keys, in broadcast order.
    pub urls: Vec<FetchKey>,
    /// Number of keys; redundant with `urls.len()` but carried on the wire.
    pub count: u32,
}

/// An ordered, deduplicated, size-bounded sequence of loaded asset keys.
///
/// Owned by the session authority; every other participant holds a replica
/// applied from received snapshots. Invariants: no duplicate keys, length
/// never exceeds the cap, and a full log silently drops further appends.
#[derive(Debug, Clone)]
pub struct ReplicationLog {
    keys: Vec<FetchKey>,
    cap: usize,
    dirty: bool,
}

impl ReplicationLog {
    /// Creates an empty log with the default cap.
    pub fn new() -> Self {
        Self::with_cap(DEFAULT_URL_CAP)
    }

    /// Creates an empty log holding at most `cap` keys.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            keys: Vec::new(),
            cap,
            dirty: false,
        }
    }

    /// Attempts to append a key, preserving the dedup and cap invariants.
    pub fn push(&mut self, key: FetchKey) -> PushOutcome {
        if self.keys.contains(&key) {
            return PushOutcome::Duplicate;
        }
        if self.keys.len() >= self.cap {
            return PushOutcome::CapReached;
        }
        self.keys.push(key);
        self.dirty = true;
        PushOutcome::Appended
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &FetchKey) -> bool {
        self.keys.contains(key)
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the log holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The configured maximum length.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Iterates the keys in broadcast order.
    pub fn keys(&self) -> impl Iterator<Item = &FetchKey> {
        self.keys.iter()
    }

    /// Empties the log and marks it dirty for propagation.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.dirty = true;
    }

    /// Returns whether the log changed since the last take, resetting the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Produces the wire snapshot of the current contents.
    pub fn snapshot(&self) -> ReplicationSnapshot {
        ReplicationSnapshot {
            urls: self.keys.clone(),
            count: self.keys.len() as u32,
        }
    }

    /// Replaces the contents with a received snapshot.
    ///
    /// Replica application re-establishes the invariants locally: duplicates
    /// are dropped and the list is truncated at the cap. The dirty flag is
    /// left untouched; applying a replica is not a local mutation.
    pub fn apply_snapshot(&mut self, snapshot: ReplicationSnapshot) {
        self.keys.clear();
        for key in snapshot.urls {
            if self.keys.len() >= self.cap {
                log::warn!("ReplicationLog: received snapshot exceeds cap; truncating");
                break;
            }
            if !self.keys.contains(&key) {
                self.keys.push(key);
            }
        }
    }

    /// Encodes the current snapshot into the opaque blob handed to the
    /// transport.
    pub fn encode(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::serde::encode_to_vec(self.snapshot(), bincode::config::standard())
    }

    /// Decodes a received blob back into a snapshot.
    pub fn decode(blob: &[u8]) -> Result<ReplicationSnapshot, bincode::error::DecodeError> {
        bincode::serde::decode_from_slice(blob, bincode::config::standard())
            .map(|(snapshot, _)| snapshot)
    }
}

impl Default for ReplicationLog {
    fn default() -> Self {
        Self::new()
    }
}
