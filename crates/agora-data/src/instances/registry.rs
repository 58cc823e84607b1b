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

use agora_core::scene::{Instance, InstanceId};
use std::collections::HashMap;

/// Tracking storage for every spawned instance, in spawn order.
///
/// Each tracked instance corresponds to exactly one spawn call; removing it
/// (individually or in bulk) ends its tracking. The registry knows nothing
/// about the scene graph — destruction of the visual object is the caller's
/// side of the contract.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    order: Vec<InstanceId>,
    instances: HashMap<InstanceId, Instance>,
}

impl InstanceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            instances: HashMap::new(),
        }
    }

    /// Begins tracking a spawned instance.
    pub fn track(&mut self, instance: Instance) {
        let id = instance.id;
        if self.instances.insert(id, instance).is_none() {
            self.order.push(id);
        }
    }

    /// Returns the tracked instance with the given id, if any.
    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    /// Stops tracking one instance, returning its record.
    pub fn remove(&mut self, id: InstanceId) -> Option<Instance> {
        let removed = self.instances.remove(&id);
        if removed.is_some() {
            self.order.retain(|tracked| *tracked != id);
        }
        removed
    }

    /// Stops tracking every instance, returning the records in spawn order.
    pub fn clear_all(&mut self) -> Vec<Instance> {
        let drained = self
            .order
            .drain(..)
            .filter_map(|id| self.instances.remove(&id))
            .collect();
        self.instances.clear();
        drained
    }

    /// Number of tracked instances.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates tracked instances in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.order.iter().filter_map(|id| self.instances.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::asset::FetchKey;
    use agora_core::scene::{Scope, Transform};
    use std::time::Duration;

    fn instance(url: &str) -> Instance {
        Instance::new(
            FetchKey::new(url),
            Scope::World,
            Transform::IDENTITY,
            Duration::ZERO,
        )
    }

    #[test]
    fn tracks_in_spawn_order() {
        let mut registry = InstanceRegistry::new();
        registry.track(instance("a"));
        registry.track(instance("b"));
        registry.track(instance("c"));

        let keys: Vec<_> = registry.iter().map(|i| i.key.as_str().to_string()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_ends_tracking() {
        let mut registry = InstanceRegistry::new();
        let tracked = instance("a");
        let id = tracked.id;
        registry.track(tracked);

        let removed = registry.remove(id).expect("instance was tracked");
        assert_eq!(removed.id, id);
        assert!(registry.is_empty());
        assert!(registry.remove(id).is_none());
    }

    #[test]
    fn clear_all_drains_in_order() {
        let mut registry = InstanceRegistry::new();
        registry.track(instance("a"));
        registry.track(instance("b"));

        let drained = registry.clear_all();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].key, FetchKey::new("a"));
        assert!(registry.is_empty());
    }
}
