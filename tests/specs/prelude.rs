//! Shared fixtures for convergence specs

pub use converge_adapters::{
    AdapterError, FakeResourceAdapter, FakeTagAdapter, ResourceAdapter, TagCall,
};
pub use converge_core::{
    apply, reconcile, CancellationToken, ErrorKind, FakeClock, Observation, PollError,
    PollOutcome, PollSpec, ProbeError, ProtectedKeys, StatusPoller, TagPhase, TagSet,
};
pub use converge_engine::{ConvergeError, Converger};
pub use std::time::Duration;

pub const ONE_UNIT: Duration = Duration::from_secs(1);

/// Endpoint-style wait: CREATING/MODIFYING until ACTIVE
pub fn endpoint_active(timeout: Duration) -> PollSpec {
    PollSpec::new(["CREATING", "MODIFYING"], ["ACTIVE"], timeout)
        .with_failure_states(["FAILED"])
        .with_poll_interval(ONE_UNIT)
}

/// Fake remote API with one poller bound to a fake clock
pub struct World {
    pub resources: FakeResourceAdapter,
    pub tags: FakeTagAdapter,
    pub clock: FakeClock,
}

impl World {
    pub fn new() -> Self {
        Self {
            resources: FakeResourceAdapter::new(),
            tags: FakeTagAdapter::new(),
            clock: FakeClock::new(),
        }
    }

    pub fn poller(&self) -> StatusPoller<FakeClock> {
        StatusPoller::new(self.clock.clone())
    }

    pub fn converger(&self) -> Converger<FakeResourceAdapter, FakeTagAdapter, FakeClock> {
        Converger::new(
            self.resources.clone(),
            self.tags.clone(),
            self.clock.clone(),
        )
    }

    /// Poll `id` straight through the resource adapter
    pub async fn poll(&self, id: &str, spec: &PollSpec) -> PollOutcome<String> {
        let resources = &self.resources;
        self.poller()
            .wait(id, spec, move || async move {
                resources
                    .describe(id)
                    .await
                    .map(|o| Observation::new(o.value.id, o.status))
                    .map_err(ProbeError::from)
            })
            .await
    }
}
