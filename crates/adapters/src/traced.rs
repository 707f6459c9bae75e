// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::resource::ResourceAdapter;
use crate::tags::TagAdapter;
use crate::AdapterError;
use async_trait::async_trait;
use converge_core::{Observation, TagSet};
use tracing::Instrument;

/// Wrapper that adds tracing to any ResourceAdapter
#[derive(Clone)]
pub struct TracedResourceAdapter<R> {
    inner: R,
}

impl<R> TracedResourceAdapter<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: ResourceAdapter> ResourceAdapter for TracedResourceAdapter<R> {
    type Resource = R::Resource;

    async fn describe(&self, id: &str) -> Result<Observation<R::Resource>, AdapterError> {
        let start = std::time::Instant::now();
        let result = self.inner.describe(id).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        // Polled in a loop, so keep successes at trace level
        match &result {
            Ok(observation) => tracing::trace!(id, status = %observation.status, elapsed_ms, "described"),
            Err(e) if e.is_not_found() => tracing::debug!(id, elapsed_ms, "not found"),
            Err(e) => tracing::warn!(id, elapsed_ms, error = %e, "describe failed"),
        }

        result
    }
}

/// Wrapper that adds tracing to any TagAdapter
#[derive(Clone)]
pub struct TracedTagAdapter<T> {
    inner: T,
}

impl<T> TracedTagAdapter<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: TagAdapter> TagAdapter for TracedTagAdapter<T> {
    async fn list_tags(&self, id: &str) -> Result<TagSet, AdapterError> {
        let result = self.inner.list_tags(id).await;
        tracing::trace!(
            id,
            count = result.as_ref().map(|t| t.len()).ok(),
            "listed tags"
        );
        result
    }

    async fn untag(&self, id: &str, keys: &[String]) -> Result<(), AdapterError> {
        let span = tracing::info_span!("tags.untag", id, count = keys.len());

        async {
            // Precondition: the API rejects empty key lists
            if keys.is_empty() {
                tracing::error!("no keys to remove");
                return Err(AdapterError::InvalidRequest(format!(
                    "untag {} called with no keys",
                    id
                )));
            }

            tracing::info!(keys = ?keys, "removing tags");

            let start = std::time::Instant::now();
            let result = self.inner.untag(id, keys).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "tags removed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "untag failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn tag(&self, id: &str, tags: &TagSet) -> Result<(), AdapterError> {
        let span = tracing::info_span!("tags.tag", id, count = tags.len());

        async {
            if tags.is_empty() {
                tracing::error!("no tags to set");
                return Err(AdapterError::InvalidRequest(format!(
                    "tag {} called with no tags",
                    id
                )));
            }

            tracing::info!(keys = ?tags.keys().collect::<Vec<_>>(), "setting tags");

            let start = std::time::Instant::now();
            let result = self.inner.tag(id, tags).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "tags set"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "tag failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
