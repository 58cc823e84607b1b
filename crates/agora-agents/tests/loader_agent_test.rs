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

use agora_agents::{CooldownTier, LoaderAgent, RequestOutcome};
use agora_core::asset::{AssetHandle, FetchKey, Model};
use agora_core::event::LoadEvent;
use agora_core::lane::{Lane, LaneKind};
use agora_core::math::{Aabb, Vec3};
use agora_core::scene::Scope;
use agora_core::LoadError;
use agora_lanes::FetchLane;
use agora_telemetry::MetricsRegistry;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// --- Test Setup: a fetch lane double that records calls and lets the test
// deliver completions manually. ---

#[derive(Clone)]
struct RecordingLane {
    calls: Arc<Mutex<Vec<FetchKey>>>,
    events: flume::Sender<LoadEvent>,
}

impl RecordingLane {
    fn new(events: flume::Sender<LoadEvent>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            events,
        }
    }

    fn calls(&self) -> Vec<FetchKey> {
        self.calls.lock().unwrap().clone()
    }

    fn complete(&self, key: &FetchKey, model: Model) {
        self.events
            .send(LoadEvent::LoadComplete {
                key: key.clone(),
                handle: AssetHandle::new(model),
            })
            .unwrap();
    }

    fn fail(&self, key: &FetchKey, reason: &str) {
        self.events
            .send(LoadEvent::LoadFailed {
                key: key.clone(),
                reason: reason.to_string(),
            })
            .unwrap();
    }
}

impl Lane for RecordingLane {
    fn strategy_name(&self) -> &'static str {
        "Recording"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Fetch
    }
}

impl FetchLane for RecordingLane {
    fn fetch(&self, key: FetchKey) {
        self.calls.lock().unwrap().push(key);
    }
}

fn model_with_extent(largest: f32) -> Model {
    Model {
        name: "test".to_string(),
        node_count: 1,
        skin_count: 0,
        bounds: Some(Aabb::from_half_extents(Vec3::new(
            largest / 2.0,
            0.25,
            0.25,
        ))),
    }
}

fn loader_with_lane() -> (LoaderAgent, RecordingLane) {
    let registry = MetricsRegistry::new();
    let mut loader = LoaderAgent::new(&registry);
    let lane = RecordingLane::new(loader.event_sender());
    loader.set_fetch_lane(Arc::new(lane.clone()));
    (loader, lane)
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn fresh_key_is_fetched_once_then_served_from_cache() {
    let (mut loader, lane) = loader_with_lane();
    let key = FetchKey::new("https://host/a.glb");

    // First request goes to the pipeline.
    let outcome = loader.request(&key, secs(0)).unwrap();
    assert!(matches!(outcome, RequestOutcome::FetchDispatched));
    assert_eq!(lane.calls().len(), 1);

    // Completion spawns exactly one instance and warms the cache.
    lane.complete(&key, model_with_extent(1.0));
    let spawned = loader.on_tick(secs(1));
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].key, key);
    assert!(loader.cache().contains(&key));

    // Second request is a cache hit: no pipeline call, one more instance.
    let outcome = loader.request(&key, secs(2)).unwrap();
    match outcome {
        RequestOutcome::Spawned(instance) => assert_eq!(instance.key, key),
        other => panic!("expected cache-hit spawn, got {other:?}"),
    }
    assert_eq!(lane.calls().len(), 1);
}

#[test]
fn concurrent_requests_share_one_fetch_and_both_spawn() {
    let (mut loader, lane) = loader_with_lane();
    let key = FetchKey::new("https://host/a.glb");

    assert!(matches!(
        loader.request(&key, secs(0)).unwrap(),
        RequestOutcome::FetchDispatched
    ));
    assert!(matches!(
        loader.request(&key, secs(0)).unwrap(),
        RequestOutcome::JoinedInFlight
    ));
    // Exactly one pipeline invocation for the two requests.
    assert_eq!(lane.calls().len(), 1);

    lane.complete(&key, model_with_extent(1.0));
    let spawned = loader.on_tick(secs(1));
    assert_eq!(spawned.len(), 2, "both requests must result in an instance");
    assert_ne!(spawned[0].id, spawned[1].id);
    assert_ne!(
        spawned[0].transform.translation,
        spawned[1].transform.translation,
        "instances never share transform state"
    );
    assert_eq!(loader.in_flight_count(), 0);
}

#[test]
fn cooldown_rejects_without_extending_the_window() {
    let (mut loader, _lane) = loader_with_lane();
    loader.set_cooldown_tier(CooldownTier::Short);
    let key = FetchKey::new("https://host/u.glb");

    assert!(loader.request(&key, secs(0)).is_ok());

    match loader.request(&key, secs(2)) {
        Err(LoadError::CooldownActive { remaining }) => {
            assert_eq!(remaining, secs(3));
        }
        other => panic!("expected cooldown rejection, got {other:?}"),
    }

    assert!(loader.request(&key, secs(5)).is_ok());
}

#[test]
fn blank_keys_are_rejected_before_any_work() {
    let (mut loader, lane) = loader_with_lane();
    assert_eq!(
        loader.request(&FetchKey::new("  "), secs(0)),
        Err(LoadError::EmptyKey)
    );
    assert!(lane.calls().is_empty());
}

#[test]
fn missing_fetch_lane_is_a_typed_rejection() {
    let registry = MetricsRegistry::new();
    let mut loader = LoaderAgent::new(&registry);
    assert_eq!(
        loader.request(&FetchKey::new("https://host/a.glb"), secs(0)),
        Err(LoadError::MissingCollaborator("fetch lane"))
    );
}

#[test]
fn failure_releases_the_in_flight_ledger() {
    let (mut loader, lane) = loader_with_lane();
    let key = FetchKey::new("https://host/broken.glb");

    loader.request(&key, secs(0)).unwrap();
    lane.fail(&key, "parse error");
    let spawned = loader.on_tick(secs(1));

    assert!(spawned.is_empty());
    assert_eq!(loader.in_flight_count(), 0);
    assert!(!loader.cache().contains(&key));

    // The caller may re-issue; the new request dispatches a new fetch.
    loader.request(&key, secs(2)).unwrap();
    assert_eq!(lane.calls().len(), 2);
}

#[test]
fn local_scope_fits_the_model_to_the_boundary() {
    let (mut loader, lane) = loader_with_lane();
    loader.set_scope(Scope::Local);
    loader.set_boundary_radius(0.5);
    let key = FetchKey::new("https://host/big.glb");

    loader.request(&key, secs(0)).unwrap();
    // Largest dimension 4.0 at radius 0.5 -> scale (0.5 * 1.8) / 4 = 0.225.
    lane.complete(&key, model_with_extent(4.0));
    let spawned = loader.on_tick(secs(1));

    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].scope, Scope::Local);
    approx::assert_relative_eq!(spawned[0].transform.scale, 0.225);
}

#[test]
fn world_scope_and_unmeasurable_geometry_keep_original_scale() {
    let (mut loader, lane) = loader_with_lane();
    let world_key = FetchKey::new("https://host/world.glb");
    loader.request(&world_key, secs(0)).unwrap();
    lane.complete(&world_key, model_with_extent(4.0));
    let spawned = loader.on_tick(secs(1));
    approx::assert_relative_eq!(spawned[0].transform.scale, 1.0);

    // Local scope with no measurable geometry skips scaling.
    loader.set_scope(Scope::Local);
    let flat_key = FetchKey::new("https://host/flat.glb");
    loader.request(&flat_key, secs(2)).unwrap();
    lane.complete(
        &flat_key,
        Model {
            name: "flat".to_string(),
            node_count: 1,
            skin_count: 0,
            bounds: None,
        },
    );
    let spawned = loader.on_tick(secs(3));
    approx::assert_relative_eq!(spawned[0].transform.scale, 1.0);
}

#[test]
fn completions_may_arrive_in_any_order() {
    let (mut loader, lane) = loader_with_lane();
    let first = FetchKey::new("https://host/first.glb");
    let second = FetchKey::new("https://host/second.glb");

    loader.request(&first, secs(0)).unwrap();
    loader.request(&second, secs(0)).unwrap();

    // The later request completes first.
    lane.complete(&second, model_with_extent(1.0));
    lane.complete(&first, model_with_extent(1.0));
    let spawned = loader.on_tick(secs(1));

    assert_eq!(spawned.len(), 2);
    assert_eq!(spawned[0].key, second);
    assert_eq!(spawned[1].key, first);
}
