// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::PollSpec;
use crate::error::PollError;

/// A single successful probe: the remote object and its derived status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation<T> {
    pub value: T,
    pub status: String,
}

impl<T> Observation<T> {
    pub fn new(value: T, status: impl Into<String>) -> Self {
        Self {
            value,
            status: status.into(),
        }
    }
}

/// Result of a polling session; exactly one per call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// Target reached. `None` when absence satisfied a delete poll.
    Converged(Option<T>),
    /// Budget exhausted while still pending
    TimedOut { last_status: Option<String> },
    /// Permanent error, failure status, or unexpected status
    Failed(PollError),
    /// The caller's cancellation token fired
    Cancelled { last_status: Option<String> },
}

impl<T> PollOutcome<T> {
    pub fn is_converged(&self) -> bool {
        matches!(self, PollOutcome::Converged(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PollOutcome::Converged(_) => "converged",
            PollOutcome::TimedOut { .. } => "timed_out",
            PollOutcome::Failed(_) => "failed",
            PollOutcome::Cancelled { .. } => "cancelled",
        }
    }

    /// Collapse into a `Result`, turning timeouts and cancellation into errors
    pub fn into_result(self, spec: &PollSpec) -> Result<Option<T>, PollError> {
        match self {
            PollOutcome::Converged(value) => Ok(value),
            PollOutcome::TimedOut { last_status } => Err(PollError::TimedOut {
                timeout: spec.timeout,
                target: spec.target_list(),
                last_status,
            }),
            PollOutcome::Failed(err) => Err(err),
            PollOutcome::Cancelled { last_status } => Err(PollError::Cancelled { last_status }),
        }
    }
}
