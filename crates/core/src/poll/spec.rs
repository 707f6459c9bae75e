// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::Backoff;
use crate::error::PollError;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Consecutive not-found probes tolerated while waiting for a target
pub const DEFAULT_NOT_FOUND_CHECKS: u32 = 20;

/// Consecutive target observations required to converge
pub const DEFAULT_CONTINUOUS_TARGET_OCCURRENCE: u32 = 1;

type FailurePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Configuration for one polling session
///
/// An empty `target` means "anything that is not pending and not a failure",
/// which together with not-found-as-success gives delete-to-absence polling.
#[derive(Clone)]
pub struct PollSpec {
    pub pending: BTreeSet<String>,
    pub target: BTreeSet<String>,
    pub timeout: Duration,
    pub backoff: Backoff,
    pub not_found_checks: u32,
    pub continuous_target_occurrence: u32,
    is_failure: Option<FailurePredicate>,
}

impl PollSpec {
    pub fn new<P, T, S>(pending: P, target: T, timeout: Duration) -> Self
    where
        P: IntoIterator<Item = S>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: pending.into_iter().map(Into::into).collect(),
            target: target.into_iter().map(Into::into).collect(),
            timeout,
            backoff: Backoff::default(),
            not_found_checks: DEFAULT_NOT_FOUND_CHECKS,
            continuous_target_occurrence: DEFAULT_CONTINUOUS_TARGET_OCCURRENCE,
            is_failure: None,
        }
    }

    /// Wait for the object to disappear (or leave `pending` for a non-failure status)
    pub fn deleted<P, S>(pending: P, timeout: Duration) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(pending, Vec::<S>::new(), timeout)
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.backoff = Backoff::fixed(interval);
        self
    }

    pub fn with_not_found_checks(mut self, checks: u32) -> Self {
        self.not_found_checks = checks;
        self
    }

    pub fn with_continuous_target_occurrence(mut self, occurrences: u32) -> Self {
        self.continuous_target_occurrence = occurrences.max(1);
        self
    }

    /// Treat any of `states` as a terminal failure
    pub fn with_failure_states<I, S>(self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let states: BTreeSet<String> = states.into_iter().map(Into::into).collect();
        if states.is_empty() {
            return self;
        }
        self.with_failure_predicate(move |status| states.contains(status))
    }

    pub fn with_failure_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.is_failure = Some(Arc::new(predicate));
        self
    }

    pub fn is_pending(&self, status: &str) -> bool {
        self.pending.contains(status)
    }

    /// Whether `status` counts as converged
    pub fn is_target(&self, status: &str) -> bool {
        if self.target.is_empty() {
            !self.is_pending(status) && !self.is_failure(status)
        } else {
            self.target.contains(status)
        }
    }

    /// Failure statuses never shadow pending or target ones
    pub fn is_failure(&self, status: &str) -> bool {
        if self.pending.contains(status) || self.target.contains(status) {
            return false;
        }
        self.is_failure.as_ref().is_some_and(|f| f(status))
    }

    /// Absence of the object satisfies this spec
    pub fn absence_is_success(&self) -> bool {
        self.target.is_empty()
    }

    pub fn validate(&self) -> Result<(), PollError> {
        if self.backoff.initial.is_zero() {
            return Err(PollError::InvalidSpec(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        let overlap: Vec<&str> = self
            .pending
            .intersection(&self.target)
            .map(String::as_str)
            .collect();
        if !overlap.is_empty() {
            return Err(PollError::InvalidSpec(format!(
                "states both pending and target: {}",
                overlap.join(", ")
            )));
        }
        Ok(())
    }

    pub(crate) fn target_list(&self) -> Vec<String> {
        self.target.iter().cloned().collect()
    }
}

impl fmt::Debug for PollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollSpec")
            .field("pending", &self.pending)
            .field("target", &self.target)
            .field("timeout", &self.timeout)
            .field("backoff", &self.backoff)
            .field("not_found_checks", &self.not_found_checks)
            .field(
                "continuous_target_occurrence",
                &self.continuous_target_occurrence,
            )
            .field("has_failure_predicate", &self.is_failure.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
