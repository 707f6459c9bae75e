// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{TagDelta, TagSet};
use crate::error::{TagError, TagPhase};
use std::future::Future;
use tracing::Instrument;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Push `delta` to the remote tag API: removals first, then updates
///
/// Each call is skipped when its half of the delta is empty, so an empty
/// delta makes no remote calls. A failed removal skips the update. After a
/// partial failure, callers recompute the delta from freshly observed tags
/// and call again.
pub async fn apply<RF, RFut, UF, UFut, E1, E2>(
    resource: &str,
    delta: TagDelta,
    remove: RF,
    update: UF,
) -> Result<(), TagError>
where
    RF: FnOnce(Vec<String>) -> RFut,
    RFut: Future<Output = Result<(), E1>>,
    UF: FnOnce(TagSet) -> UFut,
    UFut: Future<Output = Result<(), E2>>,
    E1: Into<BoxError>,
    E2: Into<BoxError>,
{
    let span = tracing::info_span!(
        "tags.apply",
        resource,
        remove = delta.to_remove.len(),
        update = delta.to_update.len(),
    );

    async move {
        if delta.is_empty() {
            tracing::debug!("tags already in sync");
            return Ok(());
        }

        let TagDelta {
            to_remove,
            to_update,
        } = delta;

        if !to_remove.is_empty() {
            let keys: Vec<String> = to_remove.into_iter().collect();
            remove(keys).await.map_err(|e| {
                let err = TagError {
                    phase: TagPhase::Remove,
                    resource: resource.to_string(),
                    source: e.into(),
                };
                tracing::error!(error = %err, "untag failed");
                err
            })?;
            tracing::info!("removed tags");
        }

        if !to_update.is_empty() {
            update(to_update).await.map_err(|e| {
                let err = TagError {
                    phase: TagPhase::Update,
                    resource: resource.to_string(),
                    source: e.into(),
                };
                tracing::error!(error = %err, "tag failed");
                err
            })?;
            tracing::info!("updated tags");
        }

        Ok(())
    }
    .instrument(span)
    .await
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;
