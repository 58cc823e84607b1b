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

//! # Agora SDK
//!
//! The stable entry point for embedding the shared-session asset engine.
//! Hosts construct one [`SessionWorld`] per participant, wire their session
//! and transport adapters, and drive it with direct operator calls plus a
//! periodic tick.

mod session_world;

pub use session_world::{SessionWorld, TickReport};

// Re-exported so embedders need only this crate for the common surface.
pub use agora_agents::{CooldownTier, PoolOutcome, RequestOutcome};
pub use agora_core::scene::Scope;
pub use agora_core::LoadError;
