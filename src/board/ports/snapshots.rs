//! Snapshot store port: the keyed repository of cached pipeline snapshots.

use crate::board::domain::{PipelineId, Snapshot, Task};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for snapshot store operations.
pub type SnapshotStoreResult<T> = Result<T, SnapshotStoreError>;

/// Keyed repository of per-pipeline board snapshots.
///
/// Exactly one snapshot is cached per pipeline id. Hydration replaces it
/// wholesale; moves patch it by whole-task-list replacement via
/// [`SnapshotStore::replace_tasks`], which is what makes capturing and
/// restoring a rollback point a single atomic swap.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Caches a freshly hydrated snapshot, replacing any prior one for the
    /// same pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Storage`] when the backing store is
    /// unavailable.
    async fn hydrate(&self, snapshot: Snapshot) -> SnapshotStoreResult<()>;

    /// Discards the cached snapshot for a pipeline, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Storage`] when the backing store is
    /// unavailable.
    async fn discard(&self, pipeline_id: PipelineId) -> SnapshotStoreResult<()>;

    /// Returns a copy of the current snapshot for a pipeline.
    ///
    /// Returns `None` when no snapshot is cached; callers treat that as a
    /// silent no-op rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Storage`] when the backing store is
    /// unavailable.
    async fn current(&self, pipeline_id: PipelineId) -> SnapshotStoreResult<Option<Snapshot>>;

    /// Replaces the task list of the pipeline's current snapshot wholesale.
    ///
    /// Acts on the snapshot cached *at call time*, so a rollback restores
    /// onto whatever state the pipeline has reached rather than a copy
    /// captured before an await point. Returns `false` when no snapshot is
    /// cached for the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Storage`] when the backing store is
    /// unavailable.
    async fn replace_tasks(
        &self,
        pipeline_id: PipelineId,
        tasks: Vec<Task>,
    ) -> SnapshotStoreResult<bool>;
}

/// Errors returned by snapshot store implementations.
#[derive(Debug, Clone, Error)]
pub enum SnapshotStoreError {
    /// Backing-store failure.
    #[error("snapshot store error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotStoreError {
    /// Wraps a backing-store error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
