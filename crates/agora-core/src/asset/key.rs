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

use serde::{Deserialize, Serialize};
use std::fmt;

/// The normalized identifier of a remotely hosted asset: its source URL.
///
/// Equality is exact string match. No canonicalization is performed, so two
/// URLs differing only by trailing slash or case are distinct keys. This is
/// the primary key of the model cache, the in-flight ledger, and the
/// replication log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchKey(String);

impl FetchKey {
    /// Creates a key from a URL string.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the underlying URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the key is empty or contains only whitespace.
    ///
    /// Blank keys are rejected before any cache or pipeline work happens.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FetchKey {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for FetchKey {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_literal() {
        assert_eq!(FetchKey::new("https://a/x.glb"), "https://a/x.glb".into());
        assert_ne!(FetchKey::new("https://a/x.glb"), "https://a/x.glb/".into());
        assert_ne!(FetchKey::new("https://a/x.glb"), "https://a/X.glb".into());
    }

    #[test]
    fn blank_detection() {
        assert!(FetchKey::new("").is_blank());
        assert!(FetchKey::new("   ").is_blank());
        assert!(!FetchKey::new("https://a/x.glb").is_blank());
    }
}
