//! Session launcher port for stage-entry automation.

use super::remote::RemoteResult;
use crate::board::domain::{SessionId, StepId, TaskId};
use crate::cancel::CancellationToken;
use async_trait::async_trait;

/// Request to start an existing agent session for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartSessionRequest {
    /// Task that entered the automated step.
    pub task_id: TaskId,
    /// Session to start.
    pub session_id: SessionId,
    /// Step whose entry action fired.
    pub step_id: StepId,
}

impl StartSessionRequest {
    /// Creates a session-start request.
    #[must_use]
    pub const fn new(task_id: TaskId, session_id: SessionId, step_id: StepId) -> Self {
        Self {
            task_id,
            session_id,
            step_id,
        }
    }
}

/// Port for the fire-and-forget session-start request.
///
/// This call is a best-effort automation side effect: callers bound it with
/// a deadline and log failures without ever rolling back the move that
/// triggered it.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    /// Starts the given session.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::board::ports::RemoteError`] variant describing the
    /// failure; callers treat every variant as log-only.
    async fn start_session(
        &self,
        request: StartSessionRequest,
        cancel: CancellationToken,
    ) -> RemoteResult<()>;
}
