// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for resource convergence

use converge_adapters::AdapterError;
use converge_core::{ErrorKind, PollError, TagError};
use thiserror::Error;

/// The single terminating error of a convergence operation
#[derive(Debug, Error)]
pub enum ConvergeError {
    #[error("waiting for resource ({resource}): {source}")]
    Wait {
        resource: String,
        #[source]
        source: PollError,
    },
    #[error(transparent)]
    Tags(#[from] TagError),
    #[error("{operation} resource ({resource}): {source}")]
    Adapter {
        operation: &'static str,
        resource: String,
        #[source]
        source: AdapterError,
    },
}

impl ConvergeError {
    pub fn resource(&self) -> &str {
        match self {
            ConvergeError::Wait { resource, .. } | ConvergeError::Adapter { resource, .. } => {
                resource
            }
            ConvergeError::Tags(e) => &e.resource,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvergeError::Wait { source, .. } => source.kind(),
            ConvergeError::Adapter { source, .. } => source.kind(),
            ConvergeError::Tags(e) => e
                .source
                .downcast_ref::<AdapterError>()
                .map_or(ErrorKind::Permanent, AdapterError::kind),
        }
    }

    /// Whether re-running the same operation may succeed
    ///
    /// Re-running is always safe; tag deltas are recomputed from fresh state.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transient | ErrorKind::Timeout)
    }
}
