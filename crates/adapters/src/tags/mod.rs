// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote tag API adapters

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTagAdapter, TagCall};

use crate::AdapterError;
use async_trait::async_trait;
use converge_core::TagSet;

/// Adapter for reading and mutating the tags of a remote object
///
/// All calls must be idempotent; callers retry them after partial failures.
#[async_trait]
pub trait TagAdapter: Clone + Send + Sync + 'static {
    /// Read the tags currently attached to `id`
    async fn list_tags(&self, id: &str) -> Result<TagSet, AdapterError>;

    /// Delete tags by key
    async fn untag(&self, id: &str, keys: &[String]) -> Result<(), AdapterError>;

    /// Upsert tags
    async fn tag(&self, id: &str, tags: &TagSet) -> Result<(), AdapterError>;
}
