// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tag reconciliation
//!
//! [`reconcile`] computes the minimal delta between observed and desired
//! tags; [`apply`] pushes that delta through caller-supplied remove/update
//! calls. Protected keys are never added, modified or removed.

mod apply;
mod delta;
mod protected;
mod set;

pub use apply::apply;
pub use delta::{reconcile, TagDelta};
pub use protected::ProtectedKeys;
pub use set::{Tag, TagSet, TagSetError};
