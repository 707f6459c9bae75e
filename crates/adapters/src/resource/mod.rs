// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote resource status adapters

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeResource, FakeResourceAdapter, ResourceCall};

use crate::AdapterError;
use async_trait::async_trait;
use converge_core::Observation;

/// Adapter for reading the current state of a remote object
#[async_trait]
pub trait ResourceAdapter: Clone + Send + Sync + 'static {
    type Resource: Send + 'static;

    /// Fetch the object and derive its status string
    ///
    /// Must be side-effect free; the poller calls it repeatedly.
    async fn describe(&self, id: &str) -> Result<Observation<Self::Resource>, AdapterError>;
}
