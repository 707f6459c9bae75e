// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

type KeyPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Keys the reconciler must leave alone
///
/// A key is protected if it starts with any prefix, equals any listed key,
/// or satisfies the custom predicate.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProtectedKeys {
    #[serde(default, rename = "protected_prefixes")]
    prefixes: Vec<String>,
    #[serde(default, rename = "protected_keys")]
    keys: BTreeSet<String>,
    #[serde(skip)]
    predicate: Option<KeyPredicate>,
}

impl ProtectedKeys {
    pub fn none() -> Self {
        Self::default()
    }

    /// Protect every key starting with `prefix` (e.g. a vendor namespace)
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self::none().with_prefix(prefix)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into());
        self
    }

    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    pub fn is_protected(&self, key: &str) -> bool {
        self.keys.contains(key)
            || self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
            || self.predicate.as_ref().is_some_and(|f| f(key))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.keys.is_empty() && self.predicate.is_none()
    }
}

impl fmt::Debug for ProtectedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtectedKeys")
            .field("prefixes", &self.prefixes)
            .field("keys", &self.keys)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "protected_tests.rs"]
mod tests;
