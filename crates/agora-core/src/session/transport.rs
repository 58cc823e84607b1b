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

/// Outbound boundary toward the host replication transport.
///
/// The core hands the transport an opaque encoded snapshot after every local
/// mutation of replicated state. Delivery, ordering across network hops, and
/// retry are entirely the transport's business.
pub trait ReplicationTransport: Send + Sync {
    /// Requests propagation of the given snapshot to all other participants.
    fn request_send(&self, blob: &[u8]);
}

/// A transport that drops every snapshot, for single-participant deployments
/// and tests that do not observe propagation.
#[derive(Debug, Default)]
pub struct NullTransport;

impl ReplicationTransport for NullTransport {
    fn request_send(&self, blob: &[u8]) {
        log::trace!("NullTransport: dropping {} byte snapshot", blob.len());
    }
}
