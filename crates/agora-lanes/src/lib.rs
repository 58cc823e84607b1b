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

//! # Agora Lanes
//!
//! Swappable retrieval strategies behind the fetch boundary: the
//! [`FetchLane`](fetch_lane::FetchLane) trait the loader delegates to, the
//! built-in [`RemoteFetchLane`](fetch_lane::RemoteFetchLane), and the GLB
//! structure decoder.

pub mod decode;
pub mod fetch_lane;

pub use decode::{decode_glb, DecodeError};
pub use fetch_lane::{FetchLane, RemoteFetchLane};
