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

//! Synchronizes the set of loaded asset keys across participants.
//!
//! Only the session authority mutates the log; every other participant holds
//! a replica and replays it through the loader on receipt, which is how late
//! joiners converge to the same visible state.

use crate::loader_agent::{LoaderAgent, RequestOutcome};
use agora_core::asset::FetchKey;
use agora_core::scene::Instance;
use agora_core::session::{ReplicationTransport, SessionAuthority};
use agora_core::LoadError;
use agora_data::{PushOutcome, ReplicationLog};
use std::sync::Arc;
use std::time::Duration;

/// Result of a broadcast attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastOutcome {
    /// The key was appended and the snapshot handed to the transport.
    Appended,
    /// The key was already in the log; nothing changed.
    Duplicate,
    /// The log is full; the key was silently dropped.
    CapReached,
    /// The local participant is not the authority; nothing changed.
    NotAuthority,
    /// The key was blank; nothing changed.
    EmptyKey,
}

/// Owns the replication log and the transport handoff.
pub struct SyncAgent {
    log: ReplicationLog,
    authority: Arc<dyn SessionAuthority>,
    transport: Arc<dyn ReplicationTransport>,
}

impl SyncAgent {
    /// Creates a sync agent with an empty log at the default cap.
    pub fn new(
        authority: Arc<dyn SessionAuthority>,
        transport: Arc<dyn ReplicationTransport>,
    ) -> Self {
        Self {
            log: ReplicationLog::new(),
            authority,
            transport,
        }
    }

    /// Overrides the log cap. Intended for deployments that sync fewer keys.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.log = ReplicationLog::with_cap(cap);
        self
    }

    /// Read access to the log (authority's copy or local replica).
    pub fn log(&self) -> &ReplicationLog {
        &self.log
    }

    /// Returns `true` while the local participant holds write permission.
    pub fn is_authority(&self) -> bool {
        self.authority.is_authority()
    }

    /// Records a successfully loaded key and requests propagation.
    ///
    /// Non-authority calls, duplicates, and cap overflows all leave the log
    /// unchanged; each is reported in the outcome and logged, never raised
    /// as a fault.
    pub fn broadcast(&mut self, key: &FetchKey) -> BroadcastOutcome {
        if key.is_blank() {
            return BroadcastOutcome::EmptyKey;
        }
        if !self.authority.is_authority() {
            log::debug!("SyncAgent: {}", LoadError::NotAuthorized);
            return BroadcastOutcome::NotAuthority;
        }

        match self.log.push(key.clone()) {
            PushOutcome::Appended => {
                log::debug!(
                    "SyncAgent: broadcast {key} ({}/{})",
                    self.log.len(),
                    self.log.cap()
                );
                self.propagate();
                BroadcastOutcome::Appended
            }
            PushOutcome::Duplicate => BroadcastOutcome::Duplicate,
            PushOutcome::CapReached => {
                log::warn!("SyncAgent: {}", LoadError::ReplicationCapExceeded);
                BroadcastOutcome::CapReached
            }
        }
    }

    /// Empties the log and requests propagation. Authority only.
    pub fn clear(&mut self) -> Result<(), LoadError> {
        if !self.authority.is_authority() {
            log::warn!("SyncAgent: {}", LoadError::NotAuthorized);
            return Err(LoadError::NotAuthorized);
        }
        self.log.clear();
        self.propagate();
        log::info!("SyncAgent: cleared all replicated keys");
        Ok(())
    }

    /// Applies a received snapshot and replays it through the loader.
    ///
    /// Every key in the snapshot is re-requested in log order; keys already
    /// cached locally spawn immediately, the rest each trigger their own
    /// fetch. Replay rejections (e.g. an active cooldown) are logged and
    /// skipped — there is no retry.
    ///
    /// Returns the instances spawned synchronously from warm cache entries.
    pub fn on_replica_update(
        &mut self,
        blob: &[u8],
        loader: &mut LoaderAgent,
        now: Duration,
    ) -> Vec<Instance> {
        let snapshot = match ReplicationLog::decode(blob) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("SyncAgent: failed to decode replica snapshot: {e}");
                return Vec::new();
            }
        };

        log::info!(
            "SyncAgent: applying replica with {} key(s)",
            snapshot.urls.len()
        );
        let keys = snapshot.urls.clone();
        self.log.apply_snapshot(snapshot);

        let mut spawned = Vec::new();
        for key in &keys {
            match loader.request(key, now) {
                Ok(RequestOutcome::Spawned(instance)) => spawned.push(instance),
                Ok(_) => {}
                Err(e) => {
                    log::warn!("SyncAgent: replayed load for {key} rejected: {e}");
                }
            }
        }
        spawned
    }

    fn propagate(&mut self) {
        if !self.log.take_dirty() {
            return;
        }
        match self.log.encode() {
            Ok(blob) => self.transport.request_send(&blob),
            Err(e) => log::error!("SyncAgent: failed to encode snapshot: {e}"),
        }
    }
}
