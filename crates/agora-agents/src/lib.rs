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

//! # Agora Agents
//!
//! The orchestrators of the shared-session asset engine. Each agent is a
//! plain single-owner state machine driven by direct calls and a periodic
//! tick; the only asynchrony is at the fetch boundary, which reports back
//! through the loader's event channel.

pub mod lifecycle_agent;
pub mod loader_agent;
pub mod loader_pool;
pub mod sync_agent;

pub use lifecycle_agent::{LifecycleAgent, LogOnlyPolicy, ReclaimAction, ReclaimPolicy};
pub use loader_agent::{CooldownPolicy, CooldownTier, LoaderAgent, RequestOutcome};
pub use loader_pool::{LoaderPool, LoaderSlot, PoolOutcome};
pub use sync_agent::{BroadcastOutcome, SyncAgent};
