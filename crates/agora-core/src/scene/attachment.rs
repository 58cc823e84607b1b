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

use super::{Instance, InstanceId};

/// Optional capability implemented by the pickup/attachment subsystem.
///
/// The capability is either present or absent as a typed option on the
/// lifecycle agent; the core never probes collaborators by name at runtime.
/// When absent, every instance reports as neither held nor anchored.
pub trait AttachmentCapability: Send + Sync {
    /// Called once per spawn so the subsystem can wire pickup/anchor support
    /// onto the new instance.
    fn on_instance_spawned(&self, instance: &Instance);

    /// Returns `true` while a participant is actively holding the instance.
    fn is_held(&self, id: InstanceId) -> bool;

    /// Returns `true` while the instance is bound to a tracked attachment
    /// point.
    fn is_anchored(&self, id: InstanceId) -> bool;
}
