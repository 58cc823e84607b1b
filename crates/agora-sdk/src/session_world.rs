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

//! The `SessionWorld` facade — a safe, typed entry point wiring the agents
//! together without exposing their internals.
//!
//! All configuration is in-memory and resets on process restart. Every
//! operator action is a direct call; there are no flags and no persisted
//! configuration file.

use agora_agents::{
    BroadcastOutcome, LifecycleAgent, LoaderAgent, LoaderPool, PoolOutcome, ReclaimPolicy,
    RequestOutcome, SyncAgent,
};
use agora_core::asset::FetchKey;
use agora_core::event::LoadEvent;
use agora_core::scene::{AttachmentCapability, Instance, Scope};
use agora_core::session::{
    FixedAuthority, NullTransport, ReplicationTransport, SessionAuthority,
};
use agora_core::LoadError;
use agora_lanes::{FetchLane, RemoteFetchLane};
use agora_telemetry::MetricsRegistry;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What one tick produced.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Instances spawned from fetch completions this tick.
    pub spawned: Vec<Instance>,
    /// Instances the lifecycle sweep chose to destroy this tick.
    pub reclaimed: Vec<Instance>,
}

/// A high-level facade over the loader, sync, lifecycle, and pool agents.
///
/// One `SessionWorld` runs per participant process. It owns the session
/// epoch: all agent timestamps are offsets from construction time.
pub struct SessionWorld {
    loader: LoaderAgent,
    sync: SyncAgent,
    lifecycle: LifecycleAgent,
    pool: LoaderPool,
    metrics: Arc<MetricsRegistry>,
    epoch: Instant,
}

impl SessionWorld {
    /// Creates a standalone world: the local participant is the authority
    /// and replication snapshots are dropped.
    pub fn new() -> Self {
        Self::with_session(Arc::new(FixedAuthority::new(true)), Arc::new(NullTransport))
    }

    /// Creates a world wired to the host's session and transport adapters.
    pub fn with_session(
        authority: Arc<dyn SessionAuthority>,
        transport: Arc<dyn ReplicationTransport>,
    ) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        let loader = LoaderAgent::new(&metrics);
        let sync = SyncAgent::new(authority.clone(), transport);
        let lifecycle = LifecycleAgent::new(&metrics);
        let pool = LoaderPool::new(authority);

        log::info!("SessionWorld: ready (authority: {})", sync.is_authority());
        Self {
            loader,
            sync,
            lifecycle,
            pool,
            metrics,
            epoch: Instant::now(),
        }
    }

    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Collaborator wiring
    // ─────────────────────────────────────────────────────────────────────

    /// Injects the fetch lane the loader delegates to.
    pub fn set_fetch_lane(&mut self, lane: Arc<dyn FetchLane>) {
        self.loader.set_fetch_lane(lane);
    }

    /// Returns a sender onto the loader's event channel.
    ///
    /// Build a custom [`FetchLane`] around this sender before handing it to
    /// [`SessionWorld::set_fetch_lane`]; holding the sender is the lane's
    /// registration as an event producer.
    pub fn load_event_sender(&self) -> flume::Sender<LoadEvent> {
        self.loader.event_sender()
    }

    /// Convenience wiring of the built-in HTTP lane onto a tokio runtime.
    pub fn attach_remote_fetch_lane(&mut self, runtime: tokio::runtime::Handle) {
        let lane = RemoteFetchLane::new(runtime, self.loader.event_sender());
        self.loader.set_fetch_lane(Arc::new(lane));
    }

    /// Wires the optional pickup/attachment capability.
    pub fn set_attachment(&mut self, attachment: Option<Arc<dyn AttachmentCapability>>) {
        self.lifecycle.set_attachment(attachment);
    }

    /// Replaces the lifecycle reclaim policy.
    pub fn set_reclaim_policy(&mut self, policy: Box<dyn ReclaimPolicy>) {
        self.lifecycle.set_policy(policy);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operator surface
    // ─────────────────────────────────────────────────────────────────────

    /// Requests a load of the model at `url`.
    ///
    /// A cache hit spawns (and integrates) immediately; a miss resolves on a
    /// later [`SessionWorld::on_tick`]. Rejections come back as typed errors
    /// and leave the world unchanged.
    pub fn request_load(&mut self, url: &str) -> Result<RequestOutcome, LoadError> {
        let key = FetchKey::new(url);
        let now = self.now();
        let outcome = self.loader.request(&key, now)?;
        if let RequestOutcome::Spawned(instance) = &outcome {
            self.integrate(instance.clone());
        }
        Ok(outcome)
    }

    /// Sets the placement mode for subsequent spawns.
    pub fn set_scope(&mut self, scope: Scope) {
        self.loader.set_scope(scope);
    }

    /// Selects the cooldown tier by operator index (0 = off, 1 = 5s,
    /// 2 = 10s, 3 = 30s); out-of-range indices clamp.
    pub fn set_cooldown_tier(&mut self, index: usize) {
        self.loader.set_cooldown_tier_index(index);
    }

    /// Sets the boundary radius used to fit Local-scope spawns.
    pub fn set_boundary_radius(&mut self, radius: f32) {
        self.loader.set_boundary_radius(radius);
    }

    /// Sets the inactivity window an active reclaim policy would use.
    /// Configuration with no wired effect under the default policy.
    pub fn set_respawn_time(&mut self, respawn_time: Duration) {
        self.lifecycle.set_respawn_time(respawn_time);
    }

    /// Sets the cache expiration configuration. No sweep enforces it;
    /// detection helpers only.
    pub fn set_cache_expiration(&mut self, expiration: Duration) {
        self.loader.set_cache_expiration(expiration);
    }

    /// Destroys every tracked instance.
    ///
    /// Always available regardless of authority; when the local participant
    /// is the authority, the replicated key log is cleared too. Returns the
    /// number of destroyed instances.
    pub fn clear_all(&mut self) -> usize {
        let destroyed = self.lifecycle.clear_all();
        let _ = self.loader.event_sender().send(LoadEvent::SceneCleared);
        if self.sync.is_authority() {
            let _ = self.sync.clear();
        }
        destroyed.len()
    }

    /// Empties the replicated key log. Authority only.
    pub fn clear_all_urls(&mut self) -> Result<(), LoadError> {
        self.sync.clear()
    }

    /// Allocates a loader surface for `url` and kicks off its first load.
    /// Authority only, capped.
    pub fn spawn_loader(&mut self, url: &str) -> PoolOutcome {
        let key = FetchKey::new(url);
        let outcome = self.pool.spawn_loader(&key);
        if matches!(outcome, PoolOutcome::Spawned { .. }) {
            if let Err(e) = self.request_load(url) {
                log::warn!("SessionWorld: loader spawned but load rejected: {e}");
            }
        }
        outcome
    }

    /// Releases every loader surface. Authority only.
    pub fn clear_all_loaders(&mut self) -> Result<usize, LoadError> {
        self.pool.clear_all()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tick and replication entry points
    // ─────────────────────────────────────────────────────────────────────

    /// Drives one tick: drains fetch completions, integrates the spawns,
    /// and runs the lifecycle sweep.
    pub fn on_tick(&mut self) -> TickReport {
        let now = self.now();
        let spawned = self.loader.on_tick(now);
        for instance in &spawned {
            self.integrate(instance.clone());
        }
        let reclaimed = self.lifecycle.on_tick(now);
        TickReport { spawned, reclaimed }
    }

    /// Applies a replication snapshot received from the host transport and
    /// replays it so this participant converges to the shared visible set.
    pub fn on_replica_update(&mut self, blob: &[u8]) {
        let now = self.now();
        let spawned = self.sync.on_replica_update(blob, &mut self.loader, now);
        for instance in spawned {
            self.integrate(instance);
        }
    }

    fn integrate(&mut self, instance: Instance) {
        let key = instance.key.clone();
        self.lifecycle.track(instance);
        // Dedup in the log makes repeat broadcasts no-ops; non-authority
        // participants fall through silently.
        if let BroadcastOutcome::Appended = self.sync.broadcast(&key) {
            log::debug!("SessionWorld: replicated {key}");
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Status surface
    // ─────────────────────────────────────────────────────────────────────

    /// Progress of the current cooldown window in `[0, 1]`.
    pub fn cooldown_progress(&self) -> f32 {
        self.loader.cooldown().progress(self.now())
    }

    /// Returns `true` while the cooldown window is closed.
    pub fn cooldown_active(&self) -> bool {
        self.loader.cooldown().is_active(self.now())
    }

    /// Number of tracked instances.
    pub fn instance_count(&self) -> usize {
        self.lifecycle.instance_count()
    }

    /// Number of keys in the replicated log (or local replica).
    pub fn loaded_url_count(&self) -> usize {
        self.sync.log().len()
    }

    /// Number of active loader surfaces.
    pub fn loader_count(&self) -> usize {
        self.pool.count()
    }

    /// Number of cached model templates.
    pub fn cache_size(&self) -> usize {
        self.loader.cache().len()
    }

    /// The metrics registry the agents record into.
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }
}

impl Default for SessionWorld {
    fn default() -> Self {
        Self::new()
    }
}
