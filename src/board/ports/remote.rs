//! Remote port for confirming moves against the authoritative store.

use crate::board::domain::{PipelineId, Step, StepId, Task, TaskId};
use crate::cancel::CancellationToken;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors yielded by the remote boundary.
///
/// Every outcome of an in-flight call is explicit here so tests can drive
/// timeout and cancellation paths without real clocks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The authoritative store rejected or failed the request.
    #[error("{0}")]
    Network(String),

    /// The caller-side deadline elapsed before the store answered.
    #[error("request timed out")]
    Timeout,

    /// The request's cancellation token was triggered.
    #[error("request cancelled")]
    Cancelled,
}

/// Move request issued to the authoritative store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    /// Task being moved.
    pub task_id: TaskId,
    /// Pipeline the task belongs to.
    pub pipeline_id: PipelineId,
    /// Destination step.
    pub target_step_id: StepId,
    /// Appended rank within the destination step.
    pub target_position: u32,
}

impl MoveTaskRequest {
    /// Creates a move request.
    #[must_use]
    pub const fn new(
        task_id: TaskId,
        pipeline_id: PipelineId,
        target_step_id: StepId,
        target_position: u32,
    ) -> Self {
        Self {
            task_id,
            pipeline_id,
            target_step_id,
            target_position,
        }
    }
}

/// Successful move confirmation from the authoritative store.
///
/// Carries the authoritative task value and the full destination step
/// definition, including its stage-entry actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskConfirmation {
    /// Task as committed by the store.
    pub task: Task,
    /// Full destination step definition.
    pub step: Step,
}

/// Port for the asynchronous move request.
#[async_trait]
pub trait BoardRemote: Send + Sync {
    /// Issues a move to the authoritative store and awaits its verdict.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Network`] with a human-readable message when
    /// the store rejects the move, [`RemoteError::Timeout`] when the
    /// caller-side deadline elapses, and [`RemoteError::Cancelled`] when
    /// `cancel` fires first.
    async fn move_task(
        &self,
        request: MoveTaskRequest,
        cancel: CancellationToken,
    ) -> RemoteResult<MoveTaskConfirmation>;
}
