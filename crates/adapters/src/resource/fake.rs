// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake resource adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::ResourceAdapter;
use crate::AdapterError;
use async_trait::async_trait;
use converge_core::Observation;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Recorded resource call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceCall {
    Describe { id: String },
}

/// Fake remote object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeResource {
    pub id: String,
    pub status: String,
}

type Step = Result<String, AdapterError>;

/// Fake resource adapter driven by per-resource scripts
///
/// Each `describe` consumes one scripted step; the last step repeats forever.
/// Unknown resources are reported as not found.
#[derive(Clone, Default)]
pub struct FakeResourceAdapter {
    scripts: Arc<Mutex<HashMap<String, VecDeque<Step>>>>,
    calls: Arc<Mutex<Vec<ResourceCall>>>,
}

impl FakeResourceAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `status` for `id` until changed
    pub fn set_status(&self, id: &str, status: &str) {
        self.script(id, vec![Ok(status.to_string())]);
    }

    /// Report the given statuses in order, repeating the last
    pub fn script_statuses(&self, id: &str, statuses: &[&str]) {
        self.script(id, statuses.iter().map(|s| Ok(s.to_string())).collect());
    }

    /// Replace the script for `id`, errors included
    pub fn script(&self, id: &str, steps: Vec<Step>) {
        self.scripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.to_string(), steps.into());
    }

    /// Make `id` disappear
    pub fn delete(&self, id: &str) {
        self.scripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ResourceCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn describe_count(&self, id: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ResourceCall::Describe { id: called } if called == id))
            .count()
    }
}

#[async_trait]
impl ResourceAdapter for FakeResourceAdapter {
    type Resource = FakeResource;

    async fn describe(&self, id: &str) -> Result<Observation<FakeResource>, AdapterError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ResourceCall::Describe { id: id.to_string() });

        let step = {
            let mut scripts = self.scripts.lock().unwrap_or_else(|e| e.into_inner());
            let Some(steps) = scripts.get_mut(id) else {
                return Err(AdapterError::NotFound(id.to_string()));
            };
            if steps.len() > 1 {
                steps.pop_front()
            } else {
                steps.front().cloned()
            }
        };

        match step {
            Some(Ok(status)) => Ok(Observation::new(
                FakeResource {
                    id: id.to_string(),
                    status: status.clone(),
                },
                status,
            )),
            Some(Err(e)) => Err(e),
            None => Err(AdapterError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
