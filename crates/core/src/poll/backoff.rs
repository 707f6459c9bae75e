// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay policy between successive probes
///
/// Starts at `initial` and multiplies by `factor` after every sleep, capped
/// at `max`. A factor of 1 gives a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backoff {
    #[serde(with = "humantime_serde")]
    pub initial: Duration,
    #[serde(with = "humantime_serde")]
    pub max: Duration,
    #[serde(default = "default_factor")]
    pub factor: u32,
}

fn default_factor() -> u32 {
    2
}

impl Backoff {
    pub fn fixed(interval: Duration) -> Self {
        Self {
            initial: interval,
            max: interval,
            factor: 1,
        }
    }

    pub fn exponential(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max: max.max(initial),
            factor: default_factor(),
        }
    }

    /// Delay to use after `delay`
    pub fn next(&self, delay: Duration) -> Duration {
        delay.saturating_mul(self.factor.max(1)).min(self.max)
    }

    /// Delay sequence starting at `initial`
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        std::iter::successors(Some(self.initial.min(self.max)), move |d| {
            Some(self.next(*d))
        })
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::exponential(Duration::from_millis(100), Duration::from_secs(10))
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
