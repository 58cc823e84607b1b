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

use agora_core::asset::{AssetHandle, FetchKey, Model};
use agora_core::event::LoadEvent;
use agora_core::lane::{Lane, LaneKind};
use agora_lanes::FetchLane;
use agora_sdk::{PoolOutcome, RequestOutcome, Scope, SessionWorld};
use std::sync::{Arc, Mutex};

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

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn complete(&self, key: &FetchKey) {
        self.events
            .send(LoadEvent::LoadComplete {
                key: key.clone(),
                handle: AssetHandle::new(Model {
                    name: key.as_str().to_string(),
                    node_count: 1,
                    skin_count: 0,
                    bounds: None,
                }),
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

fn world_with_lane() -> (SessionWorld, RecordingLane) {
    let mut world = SessionWorld::new();
    let lane = RecordingLane::new(world.load_event_sender());
    world.set_fetch_lane(Arc::new(lane.clone()));
    (world, lane)
}

#[test]
fn a_load_flows_from_request_to_tracked_and_replicated() {
    let (mut world, lane) = world_with_lane();
    let key = FetchKey::new("https://host/a.glb");

    let outcome = world.request_load(key.as_str()).unwrap();
    assert!(matches!(outcome, RequestOutcome::FetchDispatched));
    assert_eq!(world.instance_count(), 0);

    lane.complete(&key);
    let report = world.on_tick();
    assert_eq!(report.spawned.len(), 1);

    assert_eq!(world.instance_count(), 1);
    assert_eq!(world.loaded_url_count(), 1);
    assert_eq!(world.cache_size(), 1);

    // A second load of the same URL is a cache hit and does not grow the log.
    let outcome = world.request_load(key.as_str()).unwrap();
    assert!(matches!(outcome, RequestOutcome::Spawned(_)));
    assert_eq!(lane.call_count(), 1);
    assert_eq!(world.instance_count(), 2);
    assert_eq!(world.loaded_url_count(), 1);
}

#[test]
fn clear_all_resets_instances_and_the_log() {
    let (mut world, lane) = world_with_lane();
    let key = FetchKey::new("https://host/a.glb");
    world.request_load(key.as_str()).unwrap();
    lane.complete(&key);
    world.on_tick();
    assert_eq!(world.instance_count(), 1);

    let destroyed = world.clear_all();
    assert_eq!(destroyed, 1);
    assert_eq!(world.instance_count(), 0);
    assert_eq!(world.loaded_url_count(), 0);
    // The cache is not touched by a scene clear.
    assert_eq!(world.cache_size(), 1);
}

#[test]
fn scope_and_cooldown_are_operator_settings() {
    let (mut world, _lane) = world_with_lane();
    world.set_scope(Scope::Local);
    world.set_boundary_radius(0.5);
    world.set_cooldown_tier(1);

    assert!(world.request_load("https://host/a.glb").is_ok());
    assert!(world.cooldown_active());
    assert!(world.cooldown_progress() < 1.0);
    assert!(world.request_load("https://host/b.glb").is_err());
}

#[test]
fn spawn_loader_allocates_a_slot_and_requests_the_load() {
    let (mut world, lane) = world_with_lane();

    let outcome = world.spawn_loader("https://host/a.glb");
    assert!(matches!(outcome, PoolOutcome::Spawned { slot: 0, .. }));
    assert_eq!(world.loader_count(), 1);
    assert_eq!(lane.call_count(), 1);

    assert_eq!(world.clear_all_loaders(), Ok(1));
    assert_eq!(world.loader_count(), 0);
}

#[test]
fn metrics_reflect_the_load_flow() {
    let (mut world, lane) = world_with_lane();
    let key = FetchKey::new("https://host/a.glb");
    world.request_load(key.as_str()).unwrap();
    lane.complete(&key);
    world.on_tick();
    world.request_load(key.as_str()).unwrap();

    let snapshot = world.metrics().snapshot();
    let counter = |name: &str| {
        snapshot
            .counters
            .iter()
            .find(|entry| entry.id == format!("loader:{name}"))
            .map(|entry| entry.value)
            .unwrap_or_default()
    };
    assert_eq!(counter("loads_requested"), 2);
    assert_eq!(counter("fetches_dispatched"), 1);
    assert_eq!(counter("cache_hits"), 1);
    assert_eq!(counter("loads_completed"), 1);
}
