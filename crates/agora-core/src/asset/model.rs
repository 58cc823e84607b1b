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

use super::Asset;
use crate::math::Aabb;

/// The decoded template of a remotely hosted model.
///
/// A `Model` is what the fetch lane produces from raw GLB bytes: the
/// structural facts the core needs for spawning and bounding. Full geometry
/// and material import is a collaborator concern and is not represented here.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Scene name reported by the source file, or a decoder-chosen fallback.
    pub name: String,
    /// Number of nodes in the source scene graph.
    pub node_count: usize,
    /// Number of skins carried by the file. Skinned content (e.g. spring-bone
    /// rigs) is preserved untouched; the count is surfaced for diagnostics.
    pub skin_count: usize,
    /// Union of all primitive bounds in the file, or `None` when the file
    /// carries no measurable geometry.
    pub bounds: Option<Aabb>,
}

impl Model {
    /// Returns the largest dimension of the model's merged bounds.
    ///
    /// `None` when the model has no measurable geometry, in which case
    /// Local-scope fitting is skipped entirely.
    pub fn largest_dimension(&self) -> Option<f32> {
        let bounds = self.bounds.as_ref()?;
        if !bounds.is_valid() {
            return None;
        }
        let extent = bounds.max_extent();
        (extent > 0.0).then_some(extent)
    }
}

impl Asset for Model {}
