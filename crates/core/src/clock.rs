// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! The poller both reads the current time and sleeps between probes, so the
//! clock owns both. `FakeClock` turns sleeps into instant virtual-time jumps.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time and can suspend the caller
#[async_trait]
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> Instant;

    /// Suspend the current task for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Fake clock for testing with controllable time
///
/// `sleep` advances the clock by the requested duration and records it.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }

    /// Set the clock to a specific instant
    pub fn set(&self, instant: Instant) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = instant;
    }

    /// Every duration passed to `sleep`, in call order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Total virtual time spent sleeping
    pub fn slept(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(duration);
        self.advance(duration);
        // Still a suspension point, so cancellation races behave as with real time
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
