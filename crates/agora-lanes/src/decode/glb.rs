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

//! Decodes GLB/glTF bytes into the structural [`Model`] template.
//!
//! Only structure is extracted: scene name, node and skin counts, and the
//! union of all primitive bounds. Geometry and material payloads stay with
//! the external import pipeline.

use agora_core::asset::Model;
use agora_core::math::{Aabb, Vec3};
use thiserror::Error;

/// Error type for model decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes were not a valid GLB or glTF document.
    #[error("failed to parse GLB/glTF data: {0}")]
    Parse(#[from] gltf::Error),
}

/// Parses a byte slice into a [`Model`] template.
///
/// Accepts both binary GLB and JSON glTF. Bounds come from the accessor
/// min/max declarations, so no buffer data needs to be resolved; files whose
/// primitives declare no usable bounds yield `bounds: None` and Local-scope
/// fitting is skipped for them downstream.
pub fn decode_glb(bytes: &[u8]) -> Result<Model, DecodeError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let document = &gltf.document;

    let mut bounds = Aabb::INVALID;
    let mut primitive_count = 0usize;
    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let bb = primitive.bounding_box();
            let min = Vec3::new(bb.min[0], bb.min[1], bb.min[2]);
            let max = Vec3::new(bb.max[0], bb.max[1], bb.max[2]);
            bounds = bounds.merge(&Aabb::from_min_max(min, max));
            primitive_count += 1;
        }
    }

    let name = document
        .scenes()
        .filter_map(|scene| scene.name().map(str::to_owned))
        .next()
        .unwrap_or_else(|| "scene".to_string());

    let skin_count = document.skins().count();
    if skin_count > 0 {
        log::debug!("decode_glb: {skin_count} skin(s) present, preserved untouched");
    }

    Ok(Model {
        name,
        node_count: document.nodes().count(),
        skin_count,
        bounds: (primitive_count > 0 && bounds.is_valid()).then_some(bounds),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::math::approx_eq;

    // A minimal but valid glTF document: one scene, one node, one mesh
    // whose position accessor declares its bounds inline.
    const MINIMAL_GLTF: &str = r#"{
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"name": "Demo", "nodes": [0]}],
        "nodes": [{"mesh": 0}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
        "accessors": [{
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [-2.0, -1.0, -0.5],
            "max": [2.0, 1.0, 0.5]
        }]
    }"#;

    const EMPTY_GLTF: &str = r#"{"asset": {"version": "2.0"}}"#;

    #[test]
    fn decodes_structure_and_bounds() {
        let model = decode_glb(MINIMAL_GLTF.as_bytes()).expect("decode should succeed");
        assert_eq!(model.name, "Demo");
        assert_eq!(model.node_count, 1);
        assert_eq!(model.skin_count, 0);
        assert!(approx_eq(model.largest_dimension().unwrap(), 4.0));
    }

    #[test]
    fn empty_document_has_no_bounds() {
        let model = decode_glb(EMPTY_GLTF.as_bytes()).expect("decode should succeed");
        assert_eq!(model.name, "scene");
        assert_eq!(model.node_count, 0);
        assert_eq!(model.bounds, None);
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        assert!(decode_glb(b"not a model").is_err());
    }
}
