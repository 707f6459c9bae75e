// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by the poller and the tag reconciler

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Coarse classification used to decide between retrying and surfacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The remote object does not exist
    NotFound,
    /// Retryable: throttling, connection resets, remote timeouts
    Transient,
    /// Not retryable: authorization, malformed request, terminal remote state
    Permanent,
    /// Polling exceeded its budget
    Timeout,
    /// The caller aborted the operation
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Transient => "transient",
            ErrorKind::Permanent => "permanent",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Error returned by a status probe
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ProbeError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ProbeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transient, message)
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Permanent, message)
    }
}

/// Why a polling session did not converge
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    #[error("resource not found after {checks} checks: {message}")]
    NotFound { checks: u32, message: String },
    #[error("{message}{}", last_status_suffix(.last_status))]
    Permanent {
        message: String,
        last_status: Option<String>,
    },
    #[error("reached failure state '{status}'")]
    FailureState { status: String },
    #[error("unexpected state '{status}', wanted target '{}'", join_states(.expected))]
    UnexpectedState {
        status: String,
        expected: Vec<String>,
    },
    #[error(
        "timeout while waiting for state to become '{}' (last state: '{}', timeout: {})",
        join_states(.target),
        status_or_empty(.last_status),
        format_timeout(.timeout)
    )]
    TimedOut {
        timeout: Duration,
        target: Vec<String>,
        last_status: Option<String>,
    },
    #[error("cancelled while waiting{}", last_status_suffix(.last_status))]
    Cancelled { last_status: Option<String> },
    #[error("invalid poll spec: {0}")]
    InvalidSpec(String),
}

fn format_timeout(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}

fn status_or_empty(status: &Option<String>) -> &str {
    status.as_deref().unwrap_or_default()
}

fn join_states(states: &[String]) -> String {
    states.join(", ")
}

fn last_status_suffix(last_status: &Option<String>) -> String {
    match last_status {
        Some(status) => format!(" (last state: '{}')", status),
        None => String::new(),
    }
}

impl PollError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::NotFound { .. } => ErrorKind::NotFound,
            PollError::Permanent { .. }
            | PollError::FailureState { .. }
            | PollError::UnexpectedState { .. }
            | PollError::InvalidSpec(_) => ErrorKind::Permanent,
            PollError::TimedOut { .. } => ErrorKind::Timeout,
            PollError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    /// Last status observed before the session ended, if any
    pub fn last_status(&self) -> Option<&str> {
        match self {
            PollError::Permanent { last_status, .. }
            | PollError::TimedOut { last_status, .. }
            | PollError::Cancelled { last_status } => last_status.as_deref(),
            PollError::FailureState { status } | PollError::UnexpectedState { status, .. } => {
                Some(status)
            }
            PollError::NotFound { .. } | PollError::InvalidSpec(_) => None,
        }
    }
}

/// Which half of a tag delta was being applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPhase {
    Remove,
    Update,
}

impl fmt::Display for TagPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagPhase::Remove => write!(f, "untagging"),
            TagPhase::Update => write!(f, "tagging"),
        }
    }
}

/// Failure while applying a tag delta
///
/// Retrying is always safe: recomputing the delta from fresh observed tags
/// yields only the remaining work.
#[derive(Debug, Error)]
#[error("{phase} resource ({resource}): {source}")]
pub struct TagError {
    pub phase: TagPhase,
    pub resource: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
