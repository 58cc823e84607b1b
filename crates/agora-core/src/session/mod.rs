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

//! Boundary traits toward the host session layer.
//!
//! The core does not implement message delivery, ordering, or ownership
//! election; it only queries who holds write permission and hands encoded
//! replication state to a transport for propagation.

mod authority;
mod transport;

pub use authority::{FixedAuthority, ParticipantId, SessionAuthority};
pub use transport::{NullTransport, ReplicationTransport};
