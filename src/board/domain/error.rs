//! Error types for board domain validation.

use super::{StepId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A task references a step that is not part of the snapshot.
    #[error("task {task_id} references unknown step {step_id}")]
    UnknownStep {
        /// Task holding the dangling reference.
        task_id: TaskId,
        /// Step identifier that could not be resolved.
        step_id: StepId,
    },

    /// The requested task is not part of the snapshot.
    #[error("task not found in snapshot: {0}")]
    UnknownTask(TaskId),

    /// The move targets a step that is not part of the snapshot.
    #[error("target step not found in snapshot: {0}")]
    UnknownTargetStep(StepId),

    /// Task positions within a step do not form the contiguous run `0..n-1`.
    #[error("step {step_id} holds non-contiguous task positions")]
    NonContiguousPositions {
        /// Step whose ordering is broken.
        step_id: StepId,
    },

    /// The step title is empty after trimming.
    #[error("step title must not be empty")]
    EmptyStepTitle,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,
}

/// Error returned while parsing task statuses from the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
