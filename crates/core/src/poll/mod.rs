// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll-until-converged status watching
//!
//! A caller mutates a remote object, then hands a probe closure to
//! [`StatusPoller::wait`], which blocks until the observed status reaches a
//! target, hits a failure status, or the timeout elapses.

mod backoff;
mod outcome;
mod poller;
mod spec;

pub use backoff::Backoff;
pub use outcome::{Observation, PollOutcome};
pub use poller::StatusPoller;
pub use spec::{PollSpec, DEFAULT_CONTINUOUS_TARGET_OCCURRENCE, DEFAULT_NOT_FOUND_CHECKS};
