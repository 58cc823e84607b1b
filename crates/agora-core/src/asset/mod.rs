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

//! Provides the foundational traits and primitive types for Agora's asset system.
//!
//! This module defines the "common language" for all asset-related operations:
//! the [`Asset`] marker trait, the [`FetchKey`] that identifies a remotely
//! hosted asset, the shared [`AssetHandle`], and the decoded [`Model`]
//! template. It has no knowledge of how assets are fetched or cached; those
//! concerns live in higher-level crates.

mod handle;
mod key;
mod model;

pub use handle::*;
pub use key::*;
pub use model::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits enforce critical safety guarantees:
/// - `Send` + `Sync`: the asset type can be shared across the fetch boundary,
///   where downloads and decodes run off the tick thread.
/// - `'static`: the asset type contains no non-static references, so handles
///   to it can be cached for the lifetime of the session.
pub trait Asset: Send + Sync + 'static {}
