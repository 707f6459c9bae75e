//! Tag application specs
//!
//! Verify removal-then-update ordering and recovery after partial failure.

use crate::prelude::*;
use similar_asserts::assert_eq;
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn update_failure_after_removal_is_recovered_by_reconcile() {
    let observed = TagSet::from([("a", "1"), ("b", "2")]);
    let desired = TagSet::from([("a", "1"), ("c", "3")]);
    let remote = Arc::new(Mutex::new(observed.clone()));
    let delta = reconcile(&observed, &desired, &ProtectedKeys::none());

    let err = apply(
        "ep-1",
        delta,
        |keys| {
            let remote = remote.clone();
            async move {
                let mut tags = remote.lock().unwrap();
                for key in &keys {
                    tags.remove(key);
                }
                Ok::<_, AdapterError>(())
            }
        },
        |_| async { Err(AdapterError::Throttled("slow down".into())) },
    )
    .await
    .unwrap_err();

    assert_eq!(err.phase, TagPhase::Update);
    assert_eq!(err.resource, "ep-1");
    assert_eq!(
        err.to_string(),
        "tagging resource (ep-1): request throttled: slow down"
    );

    let after_removal = remote.lock().unwrap().clone();
    let retry = reconcile(&after_removal, &desired, &ProtectedKeys::none());
    assert!(retry.to_remove.is_empty());
    assert_eq!(retry.to_update, TagSet::from([("c", "3")]));
}

#[tokio::test]
async fn removal_failure_skips_update() {
    let world = World::new();
    world
        .tags
        .set_tags("ep-1", TagSet::from([("old", "1")]));
    world
        .tags
        .fail_next_untag(AdapterError::Unauthorized("denied".into()));

    let err = world
        .converger()
        .sync_tags("ep-1", &TagSet::from([("new", "2")]))
        .await
        .unwrap_err();

    match &err {
        ConvergeError::Tags(e) => assert_eq!(e.phase, TagPhase::Remove),
        other => panic!("expected tag error, got {other}"),
    }
    assert!(!err.is_retryable());
    assert_eq!(
        world.tags.mutations(),
        vec![TagCall::Untag {
            id: "ep-1".into(),
            keys: vec!["old".into()],
        }]
    );
}

#[tokio::test]
async fn in_sync_tags_make_no_calls() {
    let world = World::new();
    world.tags.set_tags("ep-1", TagSet::from([("a", "1")]));

    let delta = world
        .converger()
        .sync_tags("ep-1", &TagSet::from([("a", "1")]))
        .await
        .unwrap();

    assert!(delta.is_empty());
    assert!(world.tags.mutations().is_empty());
}
