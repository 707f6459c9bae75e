// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{Observation, PollOutcome, PollSpec};
use crate::clock::Clock;
use crate::error::{ErrorKind, PollError, ProbeError};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Blocks a caller until a remote object's status converges
///
/// Holds no per-session state, so one poller can run many independent
/// `wait` calls concurrently. Cancelling the token aborts all of them.
#[derive(Clone)]
pub struct StatusPoller<C> {
    clock: C,
    cancel: CancellationToken,
}

impl<C: Clock> StatusPoller<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Probe `query` until `spec` is satisfied, fails, times out or is cancelled
    ///
    /// The first probe is issued immediately. Transient probe errors are
    /// retried within the same wall-clock budget, measured from the first
    /// probe. Sleeps are clamped to the remaining budget.
    pub async fn wait<T, F, Fut>(&self, resource: &str, spec: &PollSpec, query: F) -> PollOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Observation<T>, ProbeError>>,
    {
        self.wait_with_cancel(resource, spec, &CancellationToken::new(), query)
            .await
    }

    /// Like `wait`, but also stops when `cancel` fires
    ///
    /// `cancel` only affects this call; the poller's own token still
    /// cancels every wait.
    pub async fn wait_with_cancel<T, F, Fut>(
        &self,
        resource: &str,
        spec: &PollSpec,
        cancel: &CancellationToken,
        query: F,
    ) -> PollOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Observation<T>, ProbeError>>,
    {
        let span = tracing::info_span!(
            "poll.wait",
            resource,
            pending = ?spec.pending,
            target = ?spec.target,
            timeout_ms = spec.timeout.as_millis() as u64,
        );
        self.run(spec, cancel, query).instrument(span).await
    }

    async fn run<T, F, Fut>(
        &self,
        spec: &PollSpec,
        cancel: &CancellationToken,
        mut query: F,
    ) -> PollOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Observation<T>, ProbeError>>,
    {
        if let Err(e) = spec.validate() {
            tracing::error!(error = %e, "rejected poll spec");
            return PollOutcome::Failed(e);
        }

        let started = self.clock.now();
        let mut delays = spec.backoff.delays();
        let mut last_status: Option<String> = None;
        let mut attempt: u32 = 0;
        let mut not_found: u32 = 0;
        let mut target_hits: u32 = 0;

        loop {
            if self.cancel.is_cancelled() || cancel.is_cancelled() {
                tracing::info!(attempt, "cancelled");
                return PollOutcome::Cancelled { last_status };
            }

            attempt += 1;
            match query().await {
                Ok(Observation { value, status }) => {
                    not_found = 0;
                    tracing::debug!(attempt, status, "observed");

                    if spec.is_failure(&status) {
                        tracing::error!(attempt, status, "reached failure state");
                        return PollOutcome::Failed(PollError::FailureState { status });
                    }

                    if spec.is_target(&status) {
                        target_hits += 1;
                        if target_hits >= spec.continuous_target_occurrence {
                            tracing::info!(
                                attempt,
                                status,
                                elapsed_ms = self.elapsed_ms(started),
                                "converged"
                            );
                            return PollOutcome::Converged(Some(value));
                        }
                    } else if spec.is_pending(&status) {
                        target_hits = 0;
                    } else {
                        tracing::error!(attempt, status, "unexpected state");
                        return PollOutcome::Failed(PollError::UnexpectedState {
                            status,
                            expected: spec.target_list(),
                        });
                    }
                    last_status = Some(status);
                }
                Err(err) => match err.kind {
                    ErrorKind::NotFound if spec.absence_is_success() => {
                        tracing::info!(
                            attempt,
                            elapsed_ms = self.elapsed_ms(started),
                            "resource gone"
                        );
                        return PollOutcome::Converged(None);
                    }
                    ErrorKind::NotFound => {
                        target_hits = 0;
                        not_found += 1;
                        if not_found > spec.not_found_checks {
                            tracing::error!(attempt, checks = not_found, "resource never appeared");
                            return PollOutcome::Failed(PollError::NotFound {
                                checks: not_found,
                                message: err.message,
                            });
                        }
                        tracing::debug!(attempt, checks = not_found, "resource not found yet");
                    }
                    // A probe that timed out on the wire is worth another try
                    ErrorKind::Transient | ErrorKind::Timeout => {
                        tracing::warn!(attempt, error = %err, "transient error, retrying");
                    }
                    ErrorKind::Cancelled => {
                        tracing::info!(attempt, "probe cancelled");
                        return PollOutcome::Cancelled { last_status };
                    }
                    ErrorKind::Permanent => {
                        tracing::error!(attempt, error = %err, "permanent error");
                        return PollOutcome::Failed(PollError::Permanent {
                            message: err.message,
                            last_status,
                        });
                    }
                },
            }

            let elapsed = self.clock.now().saturating_duration_since(started);
            if elapsed >= spec.timeout {
                tracing::warn!(
                    attempt,
                    last_status = last_status.as_deref().unwrap_or_default(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "timed out"
                );
                return PollOutcome::TimedOut { last_status };
            }

            let remaining = spec.timeout - elapsed;
            let delay = delays.next().unwrap_or(spec.backoff.max).min(remaining);
            tracing::trace!(delay_ms = delay.as_millis() as u64, "sleeping");

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::info!(attempt, "cancelled during backoff");
                    return PollOutcome::Cancelled { last_status };
                }
                _ = cancel.cancelled() => {
                    tracing::info!(attempt, "wait cancelled during backoff");
                    return PollOutcome::Cancelled { last_status };
                }
                _ = self.clock.sleep(delay) => {}
            }
        }
    }

    fn elapsed_ms(&self, started: std::time::Instant) -> u64 {
        self.clock.now().saturating_duration_since(started).as_millis() as u64
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
