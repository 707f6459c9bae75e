// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{ProtectedKeys, TagSet};
use std::collections::BTreeSet;

/// Minimal change set that brings observed tags to the desired state
///
/// `to_remove` and the keys of `to_update` are disjoint and never contain a
/// protected key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDelta {
    pub to_remove: BTreeSet<String>,
    pub to_update: TagSet,
}

impl TagDelta {
    /// Delta for a freshly created resource: tag everything desired at once
    pub fn for_create(desired: &TagSet, protected: &ProtectedKeys) -> Self {
        reconcile(&TagSet::new(), desired, protected)
    }

    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_update.is_empty()
    }

    /// Number of remote calls `apply` will make for this delta
    pub fn call_count(&self) -> usize {
        usize::from(!self.to_remove.is_empty()) + usize::from(!self.to_update.is_empty())
    }
}

/// Compute the delta from `observed` to `desired`, skipping protected keys
///
/// Pure and deterministic; equal inputs always give equal deltas.
pub fn reconcile(observed: &TagSet, desired: &TagSet, protected: &ProtectedKeys) -> TagDelta {
    let to_remove = observed
        .removed(desired)
        .keys()
        .filter(|k| !protected.is_protected(k))
        .map(str::to_string)
        .collect();
    let to_update = observed.updated(desired).without_protected(protected);

    TagDelta {
        to_remove,
        to_update,
    }
}

#[cfg(test)]
#[path = "delta_tests.rs"]
mod tests;
