// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors from remote control-plane calls

use converge_core::{ErrorKind, ProbeError};
use thiserror::Error;

/// Errors from remote resource and tag calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("request throttled: {0}")]
    Throttled(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AdapterError {
    /// Classify for retry decisions
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdapterError::NotFound(_) => ErrorKind::NotFound,
            AdapterError::Throttled(_) | AdapterError::Connection(_) => ErrorKind::Transient,
            AdapterError::Unauthorized(_) | AdapterError::InvalidRequest(_) => {
                ErrorKind::Permanent
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AdapterError::NotFound(_))
    }
}

impl From<AdapterError> for ProbeError {
    fn from(err: AdapterError) -> Self {
        ProbeError::new(err.kind(), err.to_string())
    }
}
