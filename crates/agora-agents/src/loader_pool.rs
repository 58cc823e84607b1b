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

//! An authority-gated pool of loader surfaces.
//!
//! Each slot records the URL a loader surface was spawned for and its grid
//! position. Slot state is part of the replicated surface the host
//! transport syncs; the pool itself only enforces the cap and the authority
//! gate.

use agora_core::asset::FetchKey;
use agora_core::math::Vec3;
use agora_core::session::SessionAuthority;
use agora_core::LoadError;
use std::sync::Arc;

/// Maximum number of concurrently active loader surfaces.
pub const MAX_LOADERS: usize = 10;

/// Grid spacing between loader surfaces (and spawned instances), in world
/// units along the x axis.
pub const LOADER_SPACING: f32 = 3.0;

/// One active loader surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderSlot {
    /// The URL this surface was spawned for.
    pub url: FetchKey,
    /// Grid position of the surface.
    pub position: Vec3,
}

/// Result of a pool spawn attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolOutcome {
    /// A slot was allocated at the given grid position.
    Spawned {
        /// Index of the allocated slot.
        slot: usize,
        /// Grid position assigned to the surface.
        position: Vec3,
    },
    /// The pool is at capacity; nothing was allocated.
    CapReached,
    /// The local participant is not the authority; nothing was allocated.
    NotAuthority,
}

/// Tracks active loader surfaces, capped and authority-gated.
pub struct LoaderPool {
    slots: Vec<LoaderSlot>,
    authority: Arc<dyn SessionAuthority>,
}

impl LoaderPool {
    /// Creates an empty pool.
    pub fn new(authority: Arc<dyn SessionAuthority>) -> Self {
        Self {
            slots: Vec::new(),
            authority,
        }
    }

    /// Allocates a slot for a new loader surface. Authority only.
    pub fn spawn_loader(&mut self, url: &FetchKey) -> PoolOutcome {
        if !self.authority.is_authority() {
            log::warn!("LoaderPool: {}", LoadError::NotAuthorized);
            return PoolOutcome::NotAuthority;
        }
        if self.slots.len() >= MAX_LOADERS {
            log::warn!("LoaderPool: maximum loader limit reached ({MAX_LOADERS})");
            return PoolOutcome::CapReached;
        }

        let slot = self.slots.len();
        let position = Vec3::new(slot as f32 * LOADER_SPACING, 0.0, 0.0);
        self.slots.push(LoaderSlot {
            url: url.clone(),
            position,
        });
        log::info!("LoaderPool: spawned loader {slot} for {url}");
        PoolOutcome::Spawned { slot, position }
    }

    /// Releases every slot. Authority only; returns how many were cleared.
    pub fn clear_all(&mut self) -> Result<usize, LoadError> {
        if !self.authority.is_authority() {
            log::warn!("LoaderPool: {}", LoadError::NotAuthorized);
            return Err(LoadError::NotAuthorized);
        }
        let cleared = self.slots.len();
        self.slots.clear();
        log::info!("LoaderPool: cleared {cleared} loader(s)");
        Ok(cleared)
    }

    /// Number of active loader surfaces.
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// The active slots, in spawn order.
    pub fn slots(&self) -> &[LoaderSlot] {
        &self.slots
    }
}
