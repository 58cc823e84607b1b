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

//! The lifecycle agent sweeps tracked instances for reclamation candidates.
//!
//! The sweep only ever *detects* by default: an instance that is neither
//! held nor anchored is handed to the [`ReclaimPolicy`], and the shipped
//! [`LogOnlyPolicy`] retains everything. An active policy (e.g. destroy
//! after a period of inactivity) plugs in through the same trait. Bulk
//! clearing is always available as an explicit operator action, independent
//! of the sweep policy.

use agora_core::scene::{AttachmentCapability, Instance};
use agora_data::InstanceRegistry;
use agora_telemetry::{GaugeHandle, MetricsRegistry};
use std::sync::Arc;
use std::time::Duration;

/// Default interval between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Default configured inactivity window before an active policy would
/// reclaim an instance. Configuration only: nothing consumes it.
pub const DEFAULT_RESPAWN_TIME: Duration = Duration::from_secs(300);

/// What the reclaim policy decided for one sweep candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReclaimAction {
    /// Keep the instance tracked.
    Retain,
    /// Destroy the instance and end its tracking.
    Destroy,
}

/// The plug-in point for an active reclamation policy.
///
/// `evaluate` is called once per sweep for every candidate — an instance
/// that is neither held nor anchored. Held or anchored instances are never
/// offered to the policy.
pub trait ReclaimPolicy: Send + Sync {
    /// Decides what to do with a sweep candidate.
    fn evaluate(&self, instance: &Instance, now: Duration) -> ReclaimAction;
}

/// The default policy: record the candidate and keep it.
#[derive(Debug, Default)]
pub struct LogOnlyPolicy;

impl ReclaimPolicy for LogOnlyPolicy {
    fn evaluate(&self, instance: &Instance, now: Duration) -> ReclaimAction {
        log::trace!(
            "LifecycleAgent: instance {} ({}) idle at {:.0}s, retaining",
            instance.id,
            instance.key,
            now.as_secs_f32()
        );
        ReclaimAction::Retain
    }
}

/// Tracks every spawned instance and runs the periodic sweep.
pub struct LifecycleAgent {
    registry: InstanceRegistry,
    attachment: Option<Arc<dyn AttachmentCapability>>,
    policy: Box<dyn ReclaimPolicy>,
    sweep_interval: Duration,
    last_sweep: Duration,
    respawn_time: Duration,
    instances_live: GaugeHandle,
    last_candidate_count: usize,
}

impl LifecycleAgent {
    /// Creates a lifecycle agent with the detect-only default policy.
    pub fn new(metrics_registry: &MetricsRegistry) -> Self {
        Self {
            registry: InstanceRegistry::new(),
            attachment: None,
            policy: Box::new(LogOnlyPolicy),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            last_sweep: Duration::ZERO,
            respawn_time: DEFAULT_RESPAWN_TIME,
            instances_live: metrics_registry.register_gauge(
                "lifecycle",
                "instances_live",
                "Currently tracked instances",
            ),
            last_candidate_count: 0,
        }
    }

    /// Wires the optional pickup/attachment capability.
    ///
    /// With `None`, every instance reports as neither held nor anchored.
    pub fn set_attachment(&mut self, attachment: Option<Arc<dyn AttachmentCapability>>) {
        self.attachment = attachment;
    }

    /// Replaces the reclaim policy.
    pub fn set_policy(&mut self, policy: Box<dyn ReclaimPolicy>) {
        self.policy = policy;
    }

    /// Overrides the sweep interval.
    pub fn set_sweep_interval(&mut self, interval: Duration) {
        self.sweep_interval = interval;
    }

    /// Sets the inactivity window an active policy would use.
    ///
    /// Configuration with no wired effect: the shipped policy never reads it.
    pub fn set_respawn_time(&mut self, respawn_time: Duration) {
        self.respawn_time = respawn_time;
    }

    /// The configured inactivity window.
    pub fn respawn_time(&self) -> Duration {
        self.respawn_time
    }

    /// Begins tracking a spawned instance and offers it to the attachment
    /// capability for host-integration wiring.
    pub fn track(&mut self, instance: Instance) {
        if let Some(attachment) = &self.attachment {
            attachment.on_instance_spawned(&instance);
        }
        log::debug!(
            "LifecycleAgent: tracking instance {} from {}",
            instance.id,
            instance.key
        );
        self.registry.track(instance);
        self.instances_live.set(self.registry.len() as i64);
    }

    /// Number of tracked instances.
    pub fn instance_count(&self) -> usize {
        self.registry.len()
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    /// Candidates found by the most recent sweep.
    pub fn last_candidate_count(&self) -> usize {
        self.last_candidate_count
    }

    /// Runs the periodic sweep if its interval has elapsed.
    ///
    /// Returns the instances the policy chose to destroy — empty under the
    /// default detect-only policy. The caller owns the scene-graph side of
    /// destroying them.
    pub fn on_tick(&mut self, now: Duration) -> Vec<Instance> {
        if now.saturating_sub(self.last_sweep) < self.sweep_interval {
            return Vec::new();
        }
        self.last_sweep = now;

        let mut candidates = 0usize;
        let mut to_destroy = Vec::new();
        for instance in self.registry.iter() {
            let held = self
                .attachment
                .as_ref()
                .is_some_and(|a| a.is_held(instance.id));
            let anchored = self
                .attachment
                .as_ref()
                .is_some_and(|a| a.is_anchored(instance.id));
            if held || anchored {
                continue;
            }
            candidates += 1;
            if self.policy.evaluate(instance, now) == ReclaimAction::Destroy {
                to_destroy.push(instance.id);
            }
        }
        self.last_candidate_count = candidates;

        let destroyed: Vec<Instance> = to_destroy
            .into_iter()
            .filter_map(|id| self.registry.remove(id))
            .collect();
        self.instances_live.set(self.registry.len() as i64);

        log::trace!(
            "LifecycleAgent: sweep found {candidates} candidate(s), destroyed {}",
            destroyed.len()
        );
        destroyed
    }

    /// Destroys every tracked instance immediately and empties the registry.
    pub fn clear_all(&mut self) -> Vec<Instance> {
        let destroyed = self.registry.clear_all();
        self.instances_live.set(0);
        log::info!(
            "LifecycleAgent: cleared all {} tracked instance(s)",
            destroyed.len()
        );
        destroyed
    }
}
