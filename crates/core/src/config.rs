// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wait profiles and tag policy loaded from TOML
//!
//! Timeouts and backoff differ per resource type, so they live in
//! configuration rather than in code:
//!
//! ```toml
//! [tags]
//! protected_prefixes = ["aws:"]
//!
//! [wait.endpoint_active]
//! pending = ["CREATING", "MODIFYING"]
//! target = ["ACTIVE"]
//! timeout = "10m"
//! ```

use crate::poll::{
    Backoff, PollSpec, DEFAULT_CONTINUOUS_TARGET_OCCURRENCE, DEFAULT_NOT_FOUND_CHECKS,
};
use crate::tags::ProtectedKeys;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown wait profile: {0}")]
    UnknownProfile(String),
    #[error("invalid wait profile {name}: {message}")]
    InvalidProfile { name: String, message: String },
}

/// One named polling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitProfile {
    #[serde(default)]
    pub pending: Vec<String>,
    #[serde(default)]
    pub target: Vec<String>,
    /// Statuses that end the wait as failed
    #[serde(default)]
    pub failure: Vec<String>,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Fixed delay between probes; overrides `backoff`
    #[serde(default, with = "humantime_serde")]
    pub poll_interval: Option<Duration>,
    #[serde(default)]
    pub backoff: Option<Backoff>,
    #[serde(default = "default_not_found_checks")]
    pub not_found_checks: u32,
    #[serde(default = "default_continuous_target_occurrence")]
    pub continuous_target_occurrence: u32,
}

fn default_not_found_checks() -> u32 {
    DEFAULT_NOT_FOUND_CHECKS
}

fn default_continuous_target_occurrence() -> u32 {
    DEFAULT_CONTINUOUS_TARGET_OCCURRENCE
}

impl WaitProfile {
    pub fn to_spec(&self) -> PollSpec {
        let spec = PollSpec::new(self.pending.clone(), self.target.clone(), self.timeout)
            .with_failure_states(self.failure.clone())
            .with_not_found_checks(self.not_found_checks)
            .with_continuous_target_occurrence(self.continuous_target_occurrence);
        match (self.poll_interval, self.backoff) {
            (Some(interval), _) => spec.with_poll_interval(interval),
            (None, Some(backoff)) => spec.with_backoff(backoff),
            (None, None) => spec,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvergeConfig {
    #[serde(default)]
    pub tags: ProtectedKeys,
    #[serde(default)]
    pub wait: BTreeMap<String, WaitProfile>,
}

impl ConvergeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), profiles = config.wait.len(), "loaded config");
        Ok(config)
    }

    /// Build the poll spec for a named profile
    pub fn profile(&self, name: &str) -> Result<PollSpec, ConfigError> {
        self.wait
            .get(name)
            .map(WaitProfile::to_spec)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    pub fn protected_keys(&self) -> &ProtectedKeys {
        &self.tags
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, profile) in &self.wait {
            profile
                .to_spec()
                .validate()
                .map_err(|e| ConfigError::InvalidProfile {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
