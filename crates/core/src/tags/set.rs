// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::ProtectedKeys;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A single key/value pair, for APIs that exchange tag lists instead of maps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum TagSetError {
    #[error("tags must be an object, got {0}")]
    NotAnObject(&'static str),
    #[error("tag '{key}' has a non-scalar value")]
    NonScalarValue { key: String },
}

/// Tag key to tag value, with deterministic (sorted) iteration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Tags in `self` whose keys are absent from `other`
    pub fn removed(&self, other: &TagSet) -> TagSet {
        self.0
            .iter()
            .filter(|(k, _)| !other.0.contains_key(*k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Tags in `other` that are new or carry a different value than in `self`
    pub fn updated(&self, other: &TagSet) -> TagSet {
        other
            .0
            .iter()
            .filter(|(k, v)| self.0.get(*k) != Some(*v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Copy of `self` with every protected key dropped
    pub fn without_protected(&self, protected: &ProtectedKeys) -> TagSet {
        self.0
            .iter()
            .filter(|(k, _)| !protected.is_protected(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Union of both sets; values from `other` win on conflicting keys
    ///
    /// Used to layer resource tags over provider-wide default tags.
    pub fn merge(&self, other: &TagSet) -> TagSet {
        let mut merged = self.clone();
        merged
            .0
            .extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = Tag>) -> Self {
        pairs.into_iter().map(|t| (t.key, t.value)).collect()
    }

    pub fn to_pairs(&self) -> Vec<Tag> {
        self.0
            .iter()
            .map(|(k, v)| Tag {
                key: k.clone(),
                value: v.clone(),
            })
            .collect()
    }

    /// Build from a loosely typed JSON object
    ///
    /// Null values are dropped; numbers and booleans are stringified.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, TagSetError> {
        use serde_json::Value;

        let object = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::new()),
            Value::Array(_) => return Err(TagSetError::NotAnObject("array")),
            Value::String(_) => return Err(TagSetError::NotAnObject("string")),
            Value::Number(_) => return Err(TagSetError::NotAnObject("number")),
            Value::Bool(_) => return Err(TagSetError::NotAnObject("bool")),
        };

        let mut tags = Self::new();
        for (key, value) in object {
            let value = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(TagSetError::NonScalarValue { key: key.clone() })
                }
            };
            tags.insert(key.clone(), value);
        }
        Ok(tags)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for TagSet {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for TagSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<std::collections::HashMap<String, String>> for TagSet {
    fn from(map: std::collections::HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<TagSet> for BTreeMap<String, String> {
    fn from(tags: TagSet) -> Self {
        tags.0
    }
}

impl IntoIterator for TagSet {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
#[path = "set_tests.rs"]
mod tests;
