// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the remote control-plane API

mod error;
pub mod resource;
pub mod tags;
pub mod traced;

pub use error::AdapterError;
pub use resource::ResourceAdapter;
pub use tags::TagAdapter;
pub use traced::{TracedResourceAdapter, TracedTagAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use resource::{FakeResource, FakeResourceAdapter, ResourceCall};
#[cfg(any(test, feature = "test-support"))]
pub use tags::{FakeTagAdapter, TagCall};
