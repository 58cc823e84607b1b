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

//! # Agora Data
//!
//! Pure data structures for the shared-session asset engine: the model
//! cache, the replication log, and the instance registry. No I/O happens
//! here; each structure has a single owner in the agent layer.

pub mod assets;
pub mod instances;
pub mod replication;

pub use assets::{CacheEntry, ModelCache};
pub use instances::InstanceRegistry;
pub use replication::{PushOutcome, ReplicationLog, ReplicationSnapshot};
