//! End-to-end resource lifecycle specs
//!
//! Verify create, update, and delete flows driven through the converger.

use crate::prelude::*;
use similar_asserts::assert_eq;

const CONFIG: &str = r#"
[tags]
protected_prefixes = ["aws:"]

[wait.endpoint_active]
pending = ["CREATING", "MODIFYING"]
target = ["ACTIVE"]
failure = ["FAILED"]
timeout = "10m"
poll_interval = "10s"

[wait.endpoint_deleted]
pending = ["DELETING"]
timeout = "5m"
poll_interval = "5s"
"#;

#[tokio::test]
async fn create_wait_then_tag() {
    let world = World::new();
    let config = converge_core::ConvergeConfig::from_toml_str(CONFIG).unwrap();
    let converger = Converger::from_config(
        world.resources.clone(),
        world.tags.clone(),
        world.clock.clone(),
        &config,
    );
    world
        .resources
        .script_statuses("ep-1", &["CREATING", "CREATING", "ACTIVE"]);
    world.tags.set_tags("ep-1", TagSet::new());

    let endpoint = converger
        .wait_for("ep-1", &config.profile("endpoint_active").unwrap())
        .await
        .unwrap()
        .unwrap();
    converger
        .create_tags(
            "ep-1",
            &TagSet::from([("Name", "primary"), ("aws:cloudformation:stack", "s")]),
        )
        .await
        .unwrap();

    assert_eq!(endpoint.status, "ACTIVE");
    assert_eq!(
        world.clock.sleeps(),
        vec![Duration::from_secs(10), Duration::from_secs(10)]
    );
    assert_eq!(
        world.tags.tags("ep-1"),
        Some(TagSet::from([("Name", "primary")]))
    );
}

#[tokio::test]
async fn update_preserves_system_tags() {
    let world = World::new();
    let config = converge_core::ConvergeConfig::from_toml_str(CONFIG).unwrap();
    let converger = Converger::from_config(
        world.resources.clone(),
        world.tags.clone(),
        world.clock.clone(),
        &config,
    );
    world.tags.set_tags(
        "ep-1",
        TagSet::from([("Name", "primary"), ("aws:managed", "true"), ("stale", "x")]),
    );

    let delta = converger
        .sync_tags("ep-1", &TagSet::from([("Name", "renamed")]))
        .await
        .unwrap();

    assert_eq!(delta.to_remove.iter().map(String::as_str).collect::<Vec<_>>(), vec!["stale"]);
    assert_eq!(
        world.tags.tags("ep-1"),
        Some(TagSet::from([("Name", "renamed"), ("aws:managed", "true")]))
    );
}

#[tokio::test]
async fn delete_waits_until_gone() {
    let world = World::new();
    let config = converge_core::ConvergeConfig::from_toml_str(CONFIG).unwrap();
    let converger = world.converger();
    world.resources.set_status("ep-1", "DELETING");

    let resources = world.resources.clone();
    let spec = config.profile("endpoint_deleted").unwrap();
    let (result, ()) = tokio::join!(converger.wait_deleted("ep-1", &spec), async move {
        while resources.describe_count("ep-1") < 3 {
            tokio::task::yield_now().await;
        }
        resources.delete("ep-1");
    });

    result.unwrap();
    assert!(world.resources.describe_count("ep-1") >= 4);
}
