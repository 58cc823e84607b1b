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

//! Scene-side types for spawned instances: scope, placement, and the
//! optional attachment capability.

mod attachment;
mod instance;

pub use attachment::AttachmentCapability;
pub use instance::{Instance, InstanceId, Transform};

use std::fmt;

/// Padding factor applied to the boundary radius when fitting Local-scope
/// instances: the largest model dimension is scaled to fit within
/// `2 x radius x 0.9`.
pub const BOUNDARY_PADDING: f32 = 1.8;

/// Default boundary radius for Local-scope instances.
pub const DEFAULT_BOUNDARY_RADIUS: f32 = 0.5;

/// Placement mode for spawned instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// The instance keeps the model's original scale.
    #[default]
    World,
    /// The instance is scaled so its largest dimension fits within the
    /// configured boundary radius.
    Local,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::World => write!(f, "World"),
            Scope::Local => write!(f, "Local"),
        }
    }
}

/// Computes the uniform scale factor that fits a model's largest dimension
/// inside a boundary radius.
///
/// Returns `None` when the model has no measurable geometry
/// (`largest_dimension <= 0`), in which case scaling is skipped and the
/// instance keeps scale `1.0`.
pub fn fit_scale_factor(largest_dimension: f32, boundary_radius: f32) -> Option<f32> {
    if largest_dimension <= 0.0 {
        return None;
    }
    Some(boundary_radius * BOUNDARY_PADDING / largest_dimension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn fit_factor_matches_boundary_policy() {
        // Largest dimension 4.0 at radius 0.5 -> (0.5 * 1.8) / 4 = 0.225.
        let factor = fit_scale_factor(4.0, 0.5).unwrap();
        assert!(approx_eq(factor, 0.225));
    }

    #[test]
    fn degenerate_geometry_skips_scaling() {
        assert_eq!(fit_scale_factor(0.0, 0.5), None);
        assert_eq!(fit_scale_factor(-1.0, 0.5), None);
    }
}
