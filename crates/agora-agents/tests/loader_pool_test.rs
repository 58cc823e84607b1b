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

use agora_agents::loader_pool::{LoaderPool, PoolOutcome, LOADER_SPACING, MAX_LOADERS};
use agora_core::asset::FetchKey;
use agora_core::math::Vec3;
use agora_core::session::FixedAuthority;
use agora_core::LoadError;
use std::sync::Arc;

#[test]
fn slots_are_placed_on_the_grid() {
    let mut pool = LoaderPool::new(Arc::new(FixedAuthority::new(true)));

    for n in 0..3 {
        let outcome = pool.spawn_loader(&FetchKey::new(format!("https://host/{n}.glb")));
        match outcome {
            PoolOutcome::Spawned { slot, position } => {
                assert_eq!(slot, n);
                assert_eq!(position, Vec3::new(n as f32 * LOADER_SPACING, 0.0, 0.0));
            }
            other => panic!("expected spawn, got {other:?}"),
        }
    }
    assert_eq!(pool.count(), 3);
}

#[test]
fn the_pool_is_capped() {
    let mut pool = LoaderPool::new(Arc::new(FixedAuthority::new(true)));
    for n in 0..MAX_LOADERS {
        assert!(matches!(
            pool.spawn_loader(&FetchKey::new(format!("https://host/{n}.glb"))),
            PoolOutcome::Spawned { .. }
        ));
    }
    assert_eq!(
        pool.spawn_loader(&FetchKey::new("https://host/one-too-many.glb")),
        PoolOutcome::CapReached
    );
    assert_eq!(pool.count(), MAX_LOADERS);
}

#[test]
fn only_the_authority_mutates_the_pool() {
    let authority = Arc::new(FixedAuthority::new(false));
    let mut pool = LoaderPool::new(authority.clone());

    assert_eq!(
        pool.spawn_loader(&FetchKey::new("https://host/a.glb")),
        PoolOutcome::NotAuthority
    );
    assert_eq!(pool.clear_all(), Err(LoadError::NotAuthorized));
    assert_eq!(pool.count(), 0);

    authority.set_authority(true);
    assert!(matches!(
        pool.spawn_loader(&FetchKey::new("https://host/a.glb")),
        PoolOutcome::Spawned { .. }
    ));
    assert_eq!(pool.clear_all(), Ok(1));
    assert!(pool.slots().is_empty());
}
