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

//! Registry for managing metrics.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// A unique, structured identifier for a metric: a namespace (the recording
/// agent, e.g. `"loader"`) plus a name (e.g. `"cache_hits"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricId {
    /// The broad category of the metric.
    pub namespace: String,
    /// The specific name of the metric.
    pub name: String,
}

impl MetricId {
    /// Creates a new `MetricId` with a namespace and a name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

struct CounterCell {
    description: String,
    value: Arc<AtomicU64>,
}

struct GaugeCell {
    description: String,
    value: Arc<AtomicI64>,
}

/// Central registry for metrics.
///
/// The registry hands out cheap atomic handles at registration time; the hot
/// path never touches the registry locks again. Registering the same id
/// twice returns a handle onto the existing cell.
#[derive(Default)]
pub struct MetricsRegistry {
    counters: RwLock<HashMap<MetricId, CounterCell>>,
    gauges: RwLock<HashMap<MetricId, GaugeCell>>,
}

impl MetricsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new counter metric and returns its handle.
    pub fn register_counter(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> CounterHandle {
        let id = MetricId::new(namespace, name);
        let mut counters = self.counters.write().expect("metrics lock poisoned");
        let cell = counters.entry(id.clone()).or_insert_with(|| CounterCell {
            description: description.into(),
            value: Arc::new(AtomicU64::new(0)),
        });
        CounterHandle {
            id,
            value: cell.value.clone(),
        }
    }

    /// Registers a new gauge metric and returns its handle.
    pub fn register_gauge(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> GaugeHandle {
        let id = MetricId::new(namespace, name);
        let mut gauges = self.gauges.write().expect("metrics lock poisoned");
        let cell = gauges.entry(id.clone()).or_insert_with(|| GaugeCell {
            description: description.into(),
            value: Arc::new(AtomicI64::new(0)),
        });
        GaugeHandle {
            id,
            value: cell.value.clone(),
        }
    }

    /// Current value of a counter, if registered.
    pub fn counter_value(&self, id: &MetricId) -> Option<u64> {
        self.counters
            .read()
            .expect("metrics lock poisoned")
            .get(id)
            .map(|cell| cell.value.load(Ordering::Relaxed))
    }

    /// Current value of a gauge, if registered.
    pub fn gauge_value(&self, id: &MetricId) -> Option<i64> {
        self.gauges
            .read()
            .expect("metrics lock poisoned")
            .get(id)
            .map(|cell| cell.value.load(Ordering::Relaxed))
    }

    /// Produces a serializable snapshot of every registered metric.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = self.counters.read().expect("metrics lock poisoned");
        let gauges = self.gauges.read().expect("metrics lock poisoned");

        let mut snapshot = MetricsSnapshot {
            counters: counters
                .iter()
                .map(|(id, cell)| MetricEntry {
                    id: id.to_string(),
                    description: cell.description.clone(),
                    value: cell.value.load(Ordering::Relaxed) as i64,
                })
                .collect(),
            gauges: gauges
                .iter()
                .map(|(id, cell)| MetricEntry {
                    id: id.to_string(),
                    description: cell.description.clone(),
                    value: cell.value.load(Ordering::Relaxed),
                })
                .collect(),
        };
        snapshot.counters.sort_by(|a, b| a.id.cmp(&b.id));
        snapshot.gauges.sort_by(|a, b| a.id.cmp(&b.id));
        snapshot
    }

    /// Renders the snapshot as JSON for export or debugging.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

/// One metric in a [`MetricsSnapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct MetricEntry {
    /// Formatted metric id (`namespace:name`).
    pub id: String,
    /// Description supplied at registration.
    pub description: String,
    /// Value at snapshot time.
    pub value: i64,
}

/// A point-in-time, serializable view of the registry.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// All registered counters, sorted by id.
    pub counters: Vec<MetricEntry>,
    /// All registered gauges, sorted by id.
    pub gauges: Vec<MetricEntry>,
}

/// Handle for updating a counter metric.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    id: MetricId,
    value: Arc<AtomicU64>,
}

impl CounterHandle {
    /// Increments the counter by one.
    pub fn increment(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the counter by `amount`.
    pub fn increment_by(&self, amount: u64) {
        self.value.fetch_add(amount, Ordering::Relaxed);
    }

    /// Current value.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// The metric's identifier.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

/// Handle for updating a gauge metric.
#[derive(Debug, Clone)]
pub struct GaugeHandle {
    id: MetricId,
    value: Arc<AtomicI64>,
}

impl GaugeHandle {
    /// Sets the gauge to an absolute value.
    pub fn set(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// Adds `delta` (possibly negative) to the gauge.
    pub fn add(&self, delta: i64) {
        self.value.fetch_add(delta, Ordering::Relaxed);
    }

    /// Current value.
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    /// The metric's identifier.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_through_handles() {
        let registry = MetricsRegistry::new();
        let counter = registry.register_counter("loader", "cache_hits", "Cache hits");
        counter.increment();
        counter.increment_by(2);

        assert_eq!(counter.get(), 3);
        assert_eq!(
            registry.counter_value(&MetricId::new("loader", "cache_hits")),
            Some(3)
        );
    }

    #[test]
    fn duplicate_registration_shares_the_cell() {
        let registry = MetricsRegistry::new();
        let a = registry.register_counter("loader", "loads_requested", "Requests");
        let b = registry.register_counter("loader", "loads_requested", "Requests");
        a.increment();
        assert_eq!(b.get(), 1);
    }

    #[test]
    fn gauges_move_both_directions() {
        let registry = MetricsRegistry::new();
        let gauge = registry.register_gauge("lifecycle", "instances_live", "Live instances");
        gauge.set(5);
        gauge.add(-2);
        assert_eq!(gauge.get(), 3);
    }

    #[test]
    fn snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry
            .register_counter("loader", "loads_requested", "Requests")
            .increment();
        let json = registry.to_json().expect("snapshot should serialize");
        assert!(json.contains("loader:loads_requested"));
    }
}
