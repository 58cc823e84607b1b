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

//! # Lane Abstraction
//!
//! The base trait for swappable processing strategies.
//!
//! A **Lane** encapsulates one algorithmic approach to a domain task. The
//! loader composes lanes behind trait objects so a deployment can swap the
//! retrieval strategy (remote download, local fixture, test double) without
//! touching orchestration code. Domain-specific traits extend `Lane` with
//! their execution methods; the fetch boundary's `FetchLane` is the one this
//! repository ships.

use std::fmt;

/// Classification of lane types, used for routing and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Remote asset retrieval and decode.
    Fetch,
    /// Byte-level asset decoding.
    Decode,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Fetch => write!(f, "Fetch"),
            LaneKind::Decode => write!(f, "Decode"),
        }
    }
}

/// Base trait for all lane types.
///
/// Every lane — regardless of domain — implements this trait, providing a
/// common interface for identity and classification.
pub trait Lane: Send + Sync {
    /// Human-readable name identifying this lane's strategy.
    ///
    /// Used for logging and diagnostics. Should be unique within a lane kind
    /// (e.g., `"RemoteGlb"`).
    fn strategy_name(&self) -> &'static str;

    /// The kind of processing this lane performs.
    fn lane_kind(&self) -> LaneKind;
}
