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

//! The in-memory cache of resolved model templates.

use agora_core::asset::{AssetHandle, FetchKey, Model};
use std::collections::HashMap;
use std::time::Duration;

/// Default configured expiration for cache entries.
///
/// Configuration only: no sweep enforces it against entries. `clear()` is
/// the guaranteed reclamation path; [`ModelCache::expired_keys`] reports what
/// an active policy would reclaim.
pub const DEFAULT_CACHE_EXPIRATION: Duration = Duration::from_secs(3600);

/// One resolved template plus the time it was inserted.
///
/// Entries are created on successful fetch completion, never mutated, and
/// removed only by a full clear. Any number of instances may be spawned from
/// one entry's handle.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Shared template handle for the resolved model.
    pub handle: AssetHandle<Model>,
    /// Session-relative time the entry was created.
    pub inserted_at: Duration,
}

/// A central, in-memory cache mapping fetch keys to resolved templates.
///
/// This ensures that any given asset is fetched only once per participant.
/// Subsequent requests for the same key receive a clone of the cached handle.
#[derive(Debug)]
pub struct ModelCache {
    entries: HashMap<FetchKey, CacheEntry>,
    expiration: Duration,
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelCache {
    /// Creates a new, empty cache with the default expiration configuration.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            expiration: DEFAULT_CACHE_EXPIRATION,
        }
    }

    /// Retrieves a clone of the handle cached for `key`, if any.
    pub fn lookup(&self, key: &FetchKey) -> Option<AssetHandle<Model>> {
        self.entries.get(key).map(|entry| entry.handle.clone())
    }

    /// Returns the full entry for `key`, if any.
    pub fn entry(&self, key: &FetchKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Inserts a resolved handle for `key`.
    ///
    /// No-op if the key is already present: the first writer wins, so a slow
    /// duplicate fetch can never clobber a faster one.
    pub fn insert(&mut self, key: FetchKey, handle: AssetHandle<Model>, now: Duration) {
        if self.entries.contains_key(&key) {
            log::debug!("ModelCache: dropping duplicate insert for {key}");
            return;
        }
        self.entries.insert(
            key,
            CacheEntry {
                handle,
                inserted_at: now,
            },
        );
    }

    /// Returns `true` if `key` has a cached entry.
    pub fn contains(&self, key: &FetchKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Updates the configured expiration. The setting has no wired effect on
    /// entries; it only changes what [`ModelCache::expired_keys`] reports.
    pub fn set_expiration(&mut self, expiration: Duration) {
        self.expiration = expiration;
    }

    /// The configured expiration.
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Reports the keys whose entries are older than the configured
    /// expiration at time `now`. Detection only: nothing is removed.
    pub fn expired_keys(&self, now: Duration) -> Vec<FetchKey> {
        self.entries
            .iter()
            .filter(|(_, entry)| now.saturating_sub(entry.inserted_at) > self.expiration)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str) -> AssetHandle<Model> {
        AssetHandle::new(Model {
            name: name.to_string(),
            node_count: 1,
            skin_count: 0,
            bounds: None,
        })
    }

    #[test]
    fn lookup_returns_cloned_handle() {
        let mut cache = ModelCache::new();
        let key = FetchKey::new("https://a/x.glb");
        assert!(cache.lookup(&key).is_none());

        cache.insert(key.clone(), model("x"), Duration::ZERO);
        let handle = cache.lookup(&key).expect("entry should exist");
        assert_eq!(handle.name, "x");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn first_writer_wins() {
        let mut cache = ModelCache::new();
        let key = FetchKey::new("https://a/x.glb");
        cache.insert(key.clone(), model("first"), Duration::ZERO);
        cache.insert(key.clone(), model("second"), Duration::from_secs(1));

        assert_eq!(cache.lookup(&key).unwrap().name, "first");
        assert_eq!(cache.entry(&key).unwrap().inserted_at, Duration::ZERO);
    }

    #[test]
    fn clear_removes_everything() {
        let mut cache = ModelCache::new();
        cache.insert(FetchKey::new("a"), model("a"), Duration::ZERO);
        cache.insert(FetchKey::new("b"), model("b"), Duration::ZERO);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn expiration_is_detect_only() {
        let mut cache = ModelCache::new();
        cache.set_expiration(Duration::from_secs(10));
        cache.insert(FetchKey::new("a"), model("a"), Duration::ZERO);

        let later = Duration::from_secs(11);
        assert_eq!(cache.expired_keys(later), vec![FetchKey::new("a")]);
        // Detection does not remove the entry.
        assert!(cache.contains(&FetchKey::new("a")));
        assert!(cache.expired_keys(Duration::from_secs(5)).is_empty());
    }
}
