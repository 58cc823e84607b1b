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

//! The loading orchestrator: one agent per requesting surface.
//!
//! A request runs the gates in order — blank key, cooldown, cache, in-flight
//! ledger — and only then delegates to the fetch lane. Completions come back
//! through the event channel and are drained on the tick; each pending
//! request for a completed key spawns its own instance directly from the
//! delivered handle, never by re-reading the cache.

use super::{CooldownPolicy, CooldownTier};
use crate::loader_pool::LOADER_SPACING;
use agora_core::asset::{AssetHandle, FetchKey, Model};
use agora_core::event::{EventBus, LoadEvent};
use agora_core::math::Vec3;
use agora_core::scene::{fit_scale_factor, Instance, Scope, Transform, DEFAULT_BOUNDARY_RADIUS};
use agora_core::LoadError;
use agora_data::ModelCache;
use agora_lanes::FetchLane;
use agora_telemetry::{CounterHandle, MetricsRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// How a request was resolved when it was not rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Cache hit: an instance was spawned synchronously from the cached
    /// handle, bypassing the fetch pipeline entirely.
    Spawned(Instance),
    /// Cache miss: the key was delegated to the fetch lane; the spawn will
    /// happen on a later tick when the completion event arrives.
    FetchDispatched,
    /// Cache miss, but a fetch for this key is already in flight; this
    /// request joined it and will spawn from the same completion.
    JoinedInFlight,
}

struct LoaderMetrics {
    loads_requested: CounterHandle,
    cache_hits: CounterHandle,
    fetches_dispatched: CounterHandle,
    loads_completed: CounterHandle,
    loads_failed: CounterHandle,
}

impl LoaderMetrics {
    fn new(registry: &MetricsRegistry) -> Self {
        Self {
            loads_requested: registry.register_counter(
                "loader",
                "loads_requested",
                "Requests accepted past the cooldown gate",
            ),
            cache_hits: registry.register_counter(
                "loader",
                "cache_hits",
                "Requests served from the model cache",
            ),
            fetches_dispatched: registry.register_counter(
                "loader",
                "fetches_dispatched",
                "Requests delegated to the fetch lane",
            ),
            loads_completed: registry.register_counter(
                "loader",
                "loads_completed",
                "Fetch completions received",
            ),
            loads_failed: registry.register_counter(
                "loader",
                "loads_failed",
                "Fetch failures received",
            ),
        }
    }
}

/// Orchestrates one load request end to end.
pub struct LoaderAgent {
    cache: ModelCache,
    cooldown: CooldownPolicy,
    scope: Scope,
    boundary_radius: f32,
    fetch_lane: Option<Arc<dyn FetchLane>>,
    events: EventBus<LoadEvent>,
    in_flight: HashMap<FetchKey, usize>,
    spawn_count: u64,
    metrics: LoaderMetrics,
}

impl LoaderAgent {
    /// Creates a loader with an empty cache, tier Off, World scope, and no
    /// fetch lane configured.
    pub fn new(metrics_registry: &MetricsRegistry) -> Self {
        Self {
            cache: ModelCache::new(),
            cooldown: CooldownPolicy::new(),
            scope: Scope::World,
            boundary_radius: DEFAULT_BOUNDARY_RADIUS,
            fetch_lane: None,
            events: EventBus::new(),
            in_flight: HashMap::new(),
            spawn_count: 0,
            metrics: LoaderMetrics::new(metrics_registry),
        }
    }

    /// Configures the fetch lane this loader delegates cache misses to.
    ///
    /// The lane is injected explicitly; the loader never resolves
    /// collaborators by runtime lookup.
    pub fn set_fetch_lane(&mut self, lane: Arc<dyn FetchLane>) {
        log::info!(
            "LoaderAgent: using fetch lane '{}'",
            lane.strategy_name()
        );
        self.fetch_lane = Some(lane);
    }

    /// Returns a sender onto this loader's event channel.
    ///
    /// Hand this to a fetch lane at construction time; it is the lane's
    /// registration as an event producer.
    pub fn event_sender(&self) -> flume::Sender<LoadEvent> {
        self.events.sender()
    }

    /// Sets the placement mode for subsequent spawns.
    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }

    /// The current placement mode.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Sets the boundary radius used to fit Local-scope spawns.
    pub fn set_boundary_radius(&mut self, radius: f32) {
        self.boundary_radius = radius;
    }

    /// Selects the cooldown tier.
    pub fn set_cooldown_tier(&mut self, tier: CooldownTier) {
        self.cooldown.set_tier(tier);
    }

    /// Selects the cooldown tier by operator-surface index, clamped to the
    /// valid range.
    pub fn set_cooldown_tier_index(&mut self, index: usize) {
        self.cooldown.set_tier(CooldownTier::from_index(index));
    }

    /// Read access to the cooldown state, for UI feedback.
    pub fn cooldown(&self) -> &CooldownPolicy {
        &self.cooldown
    }

    /// Read access to the model cache.
    pub fn cache(&self) -> &ModelCache {
        &self.cache
    }

    /// Drops every cached template. Instances already spawned keep their
    /// handles alive.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Updates the cache's configured expiration. Configuration with no
    /// wired effect: entries are only reclaimed by [`LoaderAgent::clear_cache`].
    pub fn set_cache_expiration(&mut self, expiration: Duration) {
        self.cache.set_expiration(expiration);
    }

    /// Number of keys currently delegated to the fetch lane.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Runs one load request through the gates.
    ///
    /// On a cache hit the spawn happens synchronously and the instance is
    /// returned; on a miss the fetch lane takes over and the spawn arrives
    /// via [`LoaderAgent::on_tick`]. A rejected request leaves all state
    /// untouched except that an accepted cooldown window is consumed.
    pub fn request(&mut self, key: &FetchKey, now: Duration) -> Result<RequestOutcome, LoadError> {
        if key.is_blank() {
            log::error!("LoaderAgent: rejected request with empty key");
            return Err(LoadError::EmptyKey);
        }

        if !self.cooldown.try_accept(now) {
            let remaining = self.cooldown.remaining(now);
            log::warn!(
                "LoaderAgent: {key} rejected, on cooldown for another {:.1}s",
                remaining.as_secs_f32()
            );
            return Err(LoadError::CooldownActive { remaining });
        }

        self.metrics.loads_requested.increment();

        if let Some(handle) = self.cache.lookup(key) {
            self.metrics.cache_hits.increment();
            return Ok(RequestOutcome::Spawned(self.spawn(key, &handle, now)));
        }

        if let Some(pending) = self.in_flight.get_mut(key) {
            *pending += 1;
            log::debug!(
                "LoaderAgent: {key} already in flight, joined ({pending} pending)"
            );
            return Ok(RequestOutcome::JoinedInFlight);
        }

        let Some(lane) = self.fetch_lane.as_ref() else {
            log::error!("LoaderAgent: no fetch lane configured, cannot load {key}");
            return Err(LoadError::missing("fetch lane"));
        };

        self.in_flight.insert(key.clone(), 1);
        lane.fetch(key.clone());
        self.metrics.fetches_dispatched.increment();
        Ok(RequestOutcome::FetchDispatched)
    }

    /// Drains the event channel and performs the deferred spawns.
    ///
    /// Returns every instance spawned this tick, in event order. Completions
    /// may arrive in any order relative to each other and to new requests.
    pub fn on_tick(&mut self, now: Duration) -> Vec<Instance> {
        let events: Vec<LoadEvent> = self.events.receiver().try_iter().collect();
        let mut spawned = Vec::new();

        for event in events {
            match event {
                LoadEvent::LoadStarted { key } => {
                    log::debug!("LoaderAgent: fetch started for {key}");
                }
                LoadEvent::LoadComplete { key, handle } => {
                    self.metrics.loads_completed.increment();
                    let pending = self.in_flight.remove(&key).unwrap_or(0);
                    self.cache.insert(key.clone(), handle.clone(), now);
                    if pending == 0 {
                        log::warn!(
                            "LoaderAgent: completion for {key} without a pending request"
                        );
                        continue;
                    }
                    for _ in 0..pending {
                        spawned.push(self.spawn(&key, &handle, now));
                    }
                }
                LoadEvent::LoadFailed { key, reason } => {
                    self.metrics.loads_failed.increment();
                    self.in_flight.remove(&key);
                    log::warn!("LoaderAgent: load failed for {key}: {reason}");
                }
                LoadEvent::SceneCleared => {
                    log::info!("LoaderAgent: scene cleared");
                }
            }
        }

        spawned
    }

    fn spawn(&mut self, key: &FetchKey, handle: &AssetHandle<Model>, now: Duration) -> Instance {
        let slot = self.spawn_count;
        self.spawn_count += 1;

        // Each spawn gets its own grid slot; instances never share
        // transform state.
        let translation = Vec3::new(slot as f32 * LOADER_SPACING, 0.0, 0.0);
        let scale = match self.scope {
            Scope::World => 1.0,
            Scope::Local => handle
                .largest_dimension()
                .and_then(|dim| fit_scale_factor(dim, self.boundary_radius))
                .unwrap_or(1.0),
        };

        let instance = Instance::new(
            key.clone(),
            self.scope,
            Transform::new(translation, scale),
            now,
        );
        if handle.skin_count > 0 {
            log::debug!(
                "LoaderAgent: '{}' carries {} skin(s), preserved untouched",
                handle.name,
                handle.skin_count
            );
        }
        log::info!(
            "LoaderAgent: spawned {}-scope instance {} from {key} (scale {:.3})",
            self.scope,
            instance.id,
            scale
        );
        instance
    }
}
