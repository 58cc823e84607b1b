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

use super::Scope;
use crate::asset::FetchKey;
use crate::math::Vec3;
use std::time::Duration;
use uuid::Uuid;

/// A unique identifier for one spawned instance.
///
/// Instance identity is per-spawn: two instances spawned from the same cache
/// entry are distinct and never share transform state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Creates a new, random (version 4) `InstanceId`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Placement of a spawned instance under its scope root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position relative to the scope root.
    pub translation: Vec3,
    /// Uniform scale applied to the model template.
    pub scale: f32,
}

impl Transform {
    /// The identity placement: origin, scale `1.0`.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        scale: 1.0,
    };

    /// Creates a transform at `translation` with the given uniform scale.
    pub const fn new(translation: Vec3, scale: f32) -> Self {
        Self { translation, scale }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A spawned, positioned copy of a resolved asset.
///
/// The registry owns instances for tracking purposes; physical containment
/// (parent/child placement under the scope root) belongs to the scene graph,
/// outside this core. The instance record is the opaque value handed to the
/// lifecycle and attachment collaborators after a spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Unique per-spawn identity.
    pub id: InstanceId,
    /// The fetch key this instance was spawned from.
    pub key: FetchKey,
    /// Placement mode the instance was created for.
    pub scope: Scope,
    /// Placement under the scope root, independent per spawn.
    pub transform: Transform,
    /// Session-relative time of the spawn.
    pub spawned_at: Duration,
}

impl Instance {
    /// Creates a new instance record with a fresh identity.
    pub fn new(key: FetchKey, scope: Scope, transform: Transform, spawned_at: Duration) -> Self {
        Self {
            id: InstanceId::new(),
            key,
            scope,
            transform,
            spawned_at,
        }
    }
}
