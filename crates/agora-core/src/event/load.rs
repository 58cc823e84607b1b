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

use crate::asset::{AssetHandle, FetchKey, Model};

/// The closed set of events a fetch lane (or the facade) may deliver to the
/// loader through its event channel.
///
/// Completion events for different in-flight keys may arrive in any order;
/// nothing in the core assumes FIFO delivery.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// The lane has accepted the key and begun retrieval.
    LoadStarted {
        /// The key being fetched.
        key: FetchKey,
    },
    /// Retrieval and decode finished; the handle is ready to spawn from.
    LoadComplete {
        /// The key that finished loading.
        key: FetchKey,
        /// Shared template handle produced by the lane.
        handle: AssetHandle<Model>,
    },
    /// Retrieval or decode failed. There is no retry; the requester must
    /// re-issue the load.
    LoadFailed {
        /// The key that failed.
        key: FetchKey,
        /// Human-readable failure description, for diagnostics only.
        reason: String,
    },
    /// Every spawned instance was removed by a bulk clear.
    SceneCleared,
}
