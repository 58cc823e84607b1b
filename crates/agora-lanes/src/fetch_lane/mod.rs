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

//! The fetch boundary: retrieval strategies the loader delegates to.

mod remote_lane;

pub use remote_lane::RemoteFetchLane;

use agora_core::asset::FetchKey;
use agora_core::lane::Lane;

/// A trait for strategies that retrieve and decode a remotely hosted asset.
///
/// `fetch` is fire-and-forget: it returns immediately and the lane reports
/// back through the typed [`LoadEvent`](agora_core::event::LoadEvent)
/// channel it was constructed with — `LoadStarted`, then `LoadComplete` or
/// `LoadFailed` at an unspecified later time, possibly never. Completion
/// events for different keys may arrive in any order. The core never
/// cancels a delegated fetch.
pub trait FetchLane: Lane {
    /// Begins retrieval of the asset identified by `key`.
    fn fetch(&self, key: FetchKey);
}
