//! In-memory snapshot store: the production cache for open pipelines.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::domain::{PipelineId, Snapshot, Task};
use crate::board::ports::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult};

/// Thread-safe in-memory snapshot store.
///
/// Holds at most one snapshot per pipeline id. This is the real cache, not
/// a test double: snapshots are deliberately non-durable and live only for
/// the duration of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    state: Arc<RwLock<HashMap<PipelineId, Snapshot>>>,
}

impl InMemorySnapshotStore {
    /// Creates an empty snapshot store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn hydrate(&self, snapshot: Snapshot) -> SnapshotStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SnapshotStoreError::storage(std::io::Error::other(err.to_string()))
        })?;
        state.insert(snapshot.pipeline_id(), snapshot);
        Ok(())
    }

    async fn discard(&self, pipeline_id: PipelineId) -> SnapshotStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SnapshotStoreError::storage(std::io::Error::other(err.to_string()))
        })?;
        state.remove(&pipeline_id);
        Ok(())
    }

    async fn current(&self, pipeline_id: PipelineId) -> SnapshotStoreResult<Option<Snapshot>> {
        let state = self.state.read().map_err(|err| {
            SnapshotStoreError::storage(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&pipeline_id).cloned())
    }

    async fn replace_tasks(
        &self,
        pipeline_id: PipelineId,
        tasks: Vec<Task>,
    ) -> SnapshotStoreResult<bool> {
        let mut state = self.state.write().map_err(|err| {
            SnapshotStoreError::storage(std::io::Error::other(err.to_string()))
        })?;
        match state.get_mut(&pipeline_id) {
            Some(snapshot) => {
                snapshot.replace_tasks(tasks);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
