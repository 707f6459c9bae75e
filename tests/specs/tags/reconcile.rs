//! Tag reconciliation specs
//!
//! Verify the computed delta is minimal and never touches protected keys.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn equal_sets_yield_empty_delta() {
    let tags = TagSet::from([("a", "1"), ("b", "2")]);

    let delta = reconcile(&tags, &tags, &ProtectedKeys::none());

    assert!(delta.is_empty());
    assert_eq!(delta.call_count(), 0);
}

#[test]
fn removes_missing_and_updates_changed() {
    let delta = reconcile(
        &TagSet::from([("a", "1"), ("b", "2")]),
        &TagSet::from([("a", "1"), ("c", "3")]),
        &ProtectedKeys::none(),
    );

    assert_eq!(delta.to_remove.iter().map(String::as_str).collect::<Vec<_>>(), vec!["b"]);
    assert_eq!(delta.to_update, TagSet::from([("c", "3")]));
}

#[test]
fn protected_keys_are_never_removed() {
    let delta = reconcile(
        &TagSet::from([("a", "1"), ("sys:internal", "x")]),
        &TagSet::new(),
        &ProtectedKeys::prefixed("sys"),
    );

    assert_eq!(delta.to_remove.iter().map(String::as_str).collect::<Vec<_>>(), vec!["a"]);
    assert!(delta.to_update.is_empty());
}

#[test]
fn reconcile_is_deterministic() {
    let observed = TagSet::from([("x", "1"), ("y", "2"), ("z", "3")]);
    let desired = TagSet::from([("y", "20"), ("w", "4")]);
    let protected = ProtectedKeys::none().with_key("z");

    let first = reconcile(&observed, &desired, &protected);
    let second = reconcile(&observed, &desired, &protected);

    assert_eq!(first, second);
}

#[test]
fn changed_value_is_updated_not_removed() {
    let delta = reconcile(
        &TagSet::from([("env", "dev")]),
        &TagSet::from([("env", "prod")]),
        &ProtectedKeys::none(),
    );

    assert!(delta.to_remove.is_empty());
    assert_eq!(delta.to_update, TagSet::from([("env", "prod")]));
}
