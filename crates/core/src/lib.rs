// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! converge-core: convergence engine for asynchronously provisioned remote objects
//!
//! This crate provides:
//! - A status poller that blocks until a remote object converges
//! - A tag reconciler computing minimal add/remove deltas
//! - A clock abstraction so both can be driven in tests
//! - TOML wait profiles and tag policy

pub mod clock;
pub mod config;
pub mod error;
pub mod poll;
pub mod tags;

#[cfg(test)]
mod test_logs;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, ConvergeConfig, WaitProfile};
pub use error::{ErrorKind, PollError, ProbeError, TagError, TagPhase};
pub use poll::{Backoff, Observation, PollOutcome, PollSpec, StatusPoller};
pub use tags::{apply, reconcile, ProtectedKeys, Tag, TagDelta, TagSet, TagSetError};
pub use tokio_util::sync::CancellationToken;
