//! Polling convergence specs
//!
//! Verify the poller reaches a target status and bounds its running time.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn target_on_first_query_converges_without_sleeping() {
    let world = World::new();
    world.resources.set_status("ep-1", "ACTIVE");

    let outcome = world
        .poll("ep-1", &endpoint_active(Duration::from_secs(60)))
        .await;

    assert!(outcome.is_converged());
    assert_eq!(world.resources.describe_count("ep-1"), 1);
    assert!(world.clock.sleeps().is_empty());
}

#[tokio::test]
async fn creating_creating_active_converges_after_two_sleeps() {
    let world = World::new();
    world
        .resources
        .script_statuses("ep-1", &["CREATING", "CREATING", "ACTIVE"]);

    let outcome = world
        .poll("ep-1", &endpoint_active(Duration::from_secs(60)))
        .await;

    match outcome {
        PollOutcome::Converged(Some(id)) => assert_eq!(id, "ep-1"),
        other => panic!("expected convergence, got {}", other.name()),
    }
    assert_eq!(world.clock.sleeps(), vec![ONE_UNIT, ONE_UNIT]);
}

#[tokio::test]
async fn always_pending_times_out_after_budget() {
    let world = World::new();
    world.resources.set_status("ep-1", "MODIFYING");
    let timeout = Duration::from_secs(30);

    let outcome = world.poll("ep-1", &endpoint_active(timeout)).await;

    match outcome {
        PollOutcome::TimedOut { last_status } => {
            assert_eq!(last_status.as_deref(), Some("MODIFYING"));
        }
        other => panic!("expected timeout, got {}", other.name()),
    }
    assert!(world.clock.slept() >= timeout);
    assert!(world.clock.slept() <= timeout + ONE_UNIT);
}

#[tokio::test]
async fn throttling_is_absorbed_until_convergence() {
    let world = World::new();
    world.resources.script(
        "ep-1",
        vec![
            Ok("CREATING".into()),
            Err(AdapterError::Throttled("rate exceeded".into())),
            Err(AdapterError::Connection("reset".into())),
            Ok("ACTIVE".into()),
        ],
    );

    let outcome = world
        .poll("ep-1", &endpoint_active(Duration::from_secs(60)))
        .await;

    assert!(outcome.is_converged());
    assert_eq!(world.clock.sleeps().len(), 3);
}

#[tokio::test]
async fn eventual_consistency_after_create_is_tolerated() {
    let world = World::new();
    world.resources.script(
        "ep-1",
        vec![
            Err(AdapterError::NotFound("ep-1".into())),
            Err(AdapterError::NotFound("ep-1".into())),
            Ok("ACTIVE".into()),
        ],
    );
    let spec = endpoint_active(Duration::from_secs(60)).with_not_found_checks(5);

    assert!(world.poll("ep-1", &spec).await.is_converged());
}

#[tokio::test]
async fn delete_wait_converges_on_absence() {
    let world = World::new();
    world.resources.script(
        "ep-1",
        vec![
            Ok("DELETING".into()),
            Err(AdapterError::NotFound("ep-1".into())),
        ],
    );
    let spec = PollSpec::deleted(["DELETING"], Duration::from_secs(60)).with_poll_interval(ONE_UNIT);

    match world.poll("ep-1", &spec).await {
        PollOutcome::Converged(None) => {}
        other => panic!("expected absence, got {}", other.name()),
    }
}

#[tokio::test]
async fn cancellation_stops_polling_with_last_status() {
    let world = World::new();
    world.resources.set_status("ep-1", "CREATING");
    let token = CancellationToken::new();
    let poller = world.poller().with_cancellation(token.clone());
    let resources = world.resources.clone();
    let spec = endpoint_active(Duration::from_secs(60));

    let mut queries = 0;
    let outcome = poller
        .wait("ep-1", &spec, || {
            queries += 1;
            if queries == 3 {
                token.cancel();
            }
            let resources = resources.clone();
            async move {
                resources
                    .describe("ep-1")
                    .await
                    .map(|o| Observation::new((), o.status))
                    .map_err(ProbeError::from)
            }
        })
        .await;

    match outcome {
        PollOutcome::Cancelled { last_status } => {
            assert_eq!(last_status.as_deref(), Some("CREATING"));
        }
        other => panic!("expected cancellation, got {}", other.name()),
    }
    assert_eq!(world.resources.describe_count("ep-1"), 3);
}
