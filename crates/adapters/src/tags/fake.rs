// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake tag adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::TagAdapter;
use crate::AdapterError;
use async_trait::async_trait;
use converge_core::TagSet;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded tag call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagCall {
    List { id: String },
    Untag { id: String, keys: Vec<String> },
    Tag { id: String, tags: TagSet },
}

#[derive(Default)]
struct FakeTagState {
    resources: HashMap<String, TagSet>,
    fail_untag: Option<AdapterError>,
    fail_tag: Option<AdapterError>,
}

/// Fake tag adapter with an in-memory tag store
///
/// Resources must be registered with `set_tags` before use.
#[derive(Clone, Default)]
pub struct FakeTagAdapter {
    state: Arc<Mutex<FakeTagState>>,
    calls: Arc<Mutex<Vec<TagCall>>>,
}

impl FakeTagAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` with the given remote tags
    pub fn set_tags(&self, id: &str, tags: TagSet) {
        self.lock_state().resources.insert(id.to_string(), tags);
    }

    /// Current remote tags for `id`
    pub fn tags(&self, id: &str) -> Option<TagSet> {
        self.lock_state().resources.get(id).cloned()
    }

    /// Fail the next untag call with `err`
    pub fn fail_next_untag(&self, err: AdapterError) {
        self.lock_state().fail_untag = Some(err);
    }

    /// Fail the next tag call with `err`
    pub fn fail_next_tag(&self, err: AdapterError) {
        self.lock_state().fail_tag = Some(err);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<TagCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded calls that mutate tags
    pub fn mutations(&self) -> Vec<TagCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, TagCall::List { .. }))
            .collect()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FakeTagState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: TagCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

#[async_trait]
impl TagAdapter for FakeTagAdapter {
    async fn list_tags(&self, id: &str) -> Result<TagSet, AdapterError> {
        self.record(TagCall::List { id: id.to_string() });
        self.lock_state()
            .resources
            .get(id)
            .cloned()
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))
    }

    async fn untag(&self, id: &str, keys: &[String]) -> Result<(), AdapterError> {
        self.record(TagCall::Untag {
            id: id.to_string(),
            keys: keys.to_vec(),
        });

        let mut state = self.lock_state();
        if let Some(err) = state.fail_untag.take() {
            return Err(err);
        }
        let tags = state
            .resources
            .get_mut(id)
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))?;
        for key in keys {
            tags.remove(key);
        }
        Ok(())
    }

    async fn tag(&self, id: &str, tags: &TagSet) -> Result<(), AdapterError> {
        self.record(TagCall::Tag {
            id: id.to_string(),
            tags: tags.clone(),
        });

        let mut state = self.lock_state();
        if let Some(err) = state.fail_tag.take() {
            return Err(err);
        }
        let current = state
            .resources
            .get_mut(id)
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))?;
        *current = current.merge(tags);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
