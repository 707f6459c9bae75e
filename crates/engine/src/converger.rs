// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource convergence: wait for status, then reconcile tags

use crate::ConvergeError;
use converge_adapters::{ResourceAdapter, TagAdapter};
use converge_core::{
    apply, reconcile, CancellationToken, Clock, ConvergeConfig, PollSpec, ProbeError,
    ProtectedKeys, StatusPoller, TagDelta, TagSet,
};

/// Drives one remote API's resources to their desired state
///
/// Holds no per-resource state; every call reads fresh state from the
/// adapters, so calls for different resources may run concurrently.
#[derive(Clone)]
pub struct Converger<R, T, C> {
    resources: R,
    tags: T,
    poller: StatusPoller<C>,
    protected: ProtectedKeys,
    default_tags: TagSet,
}

impl<R, T, C> Converger<R, T, C>
where
    R: ResourceAdapter,
    T: TagAdapter,
    C: Clock,
{
    pub fn new(resources: R, tags: T, clock: C) -> Self {
        Self {
            resources,
            tags,
            poller: StatusPoller::new(clock),
            protected: ProtectedKeys::none(),
            default_tags: TagSet::new(),
        }
    }

    /// Take the tag policy from configuration
    pub fn from_config(resources: R, tags: T, clock: C, config: &ConvergeConfig) -> Self {
        Self::new(resources, tags, clock).with_protected_keys(config.protected_keys().clone())
    }

    pub fn with_protected_keys(mut self, protected: ProtectedKeys) -> Self {
        self.protected = protected;
        self
    }

    /// Tags applied to every resource; resource tags win on conflicts
    pub fn with_default_tags(mut self, default_tags: TagSet) -> Self {
        self.default_tags = default_tags;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.poller = self.poller.with_cancellation(cancel);
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        self.poller.cancellation_token()
    }

    /// Block until `id` reaches a target status of `spec`
    ///
    /// Returns the last observed resource, or `None` when `spec` treats
    /// absence as success and the resource is gone.
    pub async fn wait_for(
        &self,
        id: &str,
        spec: &PollSpec,
    ) -> Result<Option<R::Resource>, ConvergeError> {
        self.wait_for_with_cancel(id, spec, &CancellationToken::new())
            .await
    }

    /// `wait_for` that can also be stopped through `cancel` alone
    ///
    /// Other waits on this converger keep running when `cancel` fires.
    pub async fn wait_for_with_cancel(
        &self,
        id: &str,
        spec: &PollSpec,
        cancel: &CancellationToken,
    ) -> Result<Option<R::Resource>, ConvergeError> {
        let resources = &self.resources;
        self.poller
            .wait_with_cancel(id, spec, cancel, move || async move {
                resources.describe(id).await.map_err(ProbeError::from)
            })
            .await
            .into_result(spec)
            .map_err(|source| ConvergeError::Wait {
                resource: id.to_string(),
                source,
            })
    }

    /// Block until `id` is gone (or left `spec.pending` for a non-failure status)
    pub async fn wait_deleted(&self, id: &str, spec: &PollSpec) -> Result<(), ConvergeError> {
        if !spec.absence_is_success() {
            return Err(ConvergeError::Wait {
                resource: id.to_string(),
                source: converge_core::PollError::InvalidSpec(
                    "delete waits must have an empty target".to_string(),
                ),
            });
        }
        self.wait_for(id, spec).await.map(|_| ())
    }

    pub async fn list_tags(&self, id: &str) -> Result<TagSet, ConvergeError> {
        self.tags
            .list_tags(id)
            .await
            .map_err(|source| ConvergeError::Adapter {
                operation: "listing tags for",
                resource: id.to_string(),
                source,
            })
    }

    /// Tag a freshly created resource with everything desired
    pub async fn create_tags(&self, id: &str, desired: &TagSet) -> Result<(), ConvergeError> {
        let delta = TagDelta::for_create(&self.effective(desired), &self.protected);
        self.apply_delta(id, delta).await
    }

    /// Move tags from `old` to `new` without reading remote state
    pub async fn update_tags(
        &self,
        id: &str,
        old: &TagSet,
        new: &TagSet,
    ) -> Result<(), ConvergeError> {
        let delta = reconcile(&self.effective(old), &self.effective(new), &self.protected);
        self.apply_delta(id, delta).await
    }

    /// Read the remote tags and reconcile them against `desired`
    ///
    /// This is the retry path after a partial failure: the delta only holds
    /// the work that is still outstanding. Returns the applied delta.
    pub async fn sync_tags(&self, id: &str, desired: &TagSet) -> Result<TagDelta, ConvergeError> {
        let observed = self.list_tags(id).await?;
        let delta = reconcile(&observed, &self.effective(desired), &self.protected);
        tracing::debug!(
            resource = id,
            remove = delta.to_remove.len(),
            update = delta.to_update.len(),
            "reconciled tags"
        );
        self.apply_delta(id, delta.clone()).await?;
        Ok(delta)
    }

    fn effective(&self, desired: &TagSet) -> TagSet {
        self.default_tags.merge(desired)
    }

    async fn apply_delta(&self, id: &str, delta: TagDelta) -> Result<(), ConvergeError> {
        let tags = &self.tags;
        apply(
            id,
            delta,
            move |keys| async move { tags.untag(id, &keys).await },
            move |updated| async move { tags.tag(id, &updated).await },
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "converger_tests.rs"]
mod tests;
