//! Scripted in-memory remote adapters for board move tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::board::domain::{SessionId, Step, TaskId};
use crate::board::ports::{
    AutomationSink, BoardRemote, MoveFailureSink, MoveTaskConfirmation, MoveTaskRequest,
    RemoteError, RemoteResult, SessionLauncher, StartSessionRequest,
};
use crate::cancel::CancellationToken;

/// Scripted in-memory authoritative store.
///
/// Pops one scripted outcome per move request and records every request it
/// receives. An unscripted request fails with a network error so a test
/// that forgot to script its remote is loud rather than silently green.
#[derive(Debug, Default)]
pub struct InMemoryBoardRemote {
    outcomes: Mutex<VecDeque<RemoteResult<MoveTaskConfirmation>>>,
    requests: Mutex<Vec<MoveTaskRequest>>,
}

impl InMemoryBoardRemote {
    /// Creates a remote with no scripted outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next move outcome.
    pub fn enqueue(&self, outcome: RemoteResult<MoveTaskConfirmation>) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Scripts a confirmation for the next move.
    pub fn confirm_with(&self, confirmation: MoveTaskConfirmation) {
        self.enqueue(Ok(confirmation));
    }

    /// Scripts a network rejection for the next move.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.enqueue(Err(RemoteError::Network(message.into())));
    }

    /// Returns every move request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<MoveTaskRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl BoardRemote for InMemoryBoardRemote {
    async fn move_task(
        &self,
        request: MoveTaskRequest,
        cancel: CancellationToken,
    ) -> RemoteResult<MoveTaskConfirmation> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        if cancel.is_cancelled() {
            return Err(RemoteError::Cancelled);
        }
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Network("no scripted move outcome".to_owned())))
    }
}

/// Scripted in-memory session launcher.
///
/// Records every session-start request; unscripted requests succeed, which
/// matches the common fire-and-forget happy path.
#[derive(Debug, Default)]
pub struct InMemorySessionLauncher {
    outcomes: Mutex<VecDeque<RemoteResult<()>>>,
    requests: Mutex<Vec<StartSessionRequest>>,
}

impl InMemorySessionLauncher {
    /// Creates a launcher whose requests all succeed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next session-start outcome.
    pub fn enqueue(&self, outcome: RemoteResult<()>) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Returns every session-start request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<StartSessionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SessionLauncher for InMemorySessionLauncher {
    async fn start_session(
        &self,
        request: StartSessionRequest,
        cancel: CancellationToken,
    ) -> RemoteResult<()> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        if cancel.is_cancelled() {
            return Err(RemoteError::Cancelled);
        }
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

/// A move failure captured by [`RecordingFailureSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMoveFailure {
    /// Best-effort remote error message.
    pub message: String,
    /// Task whose move was rolled back.
    pub task_id: TaskId,
    /// Session attached to the task at failure time, if any.
    pub session_id: Option<SessionId>,
}

/// Recording sink for failed moves.
#[derive(Debug, Default)]
pub struct RecordingFailureSink {
    failures: Mutex<Vec<RecordedMoveFailure>>,
}

impl RecordingFailureSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded failure.
    #[must_use]
    pub fn failures(&self) -> Vec<RecordedMoveFailure> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl MoveFailureSink for RecordingFailureSink {
    fn move_failed(&self, message: &str, task_id: TaskId, session_id: Option<SessionId>) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedMoveFailure {
                message: message.to_owned(),
                task_id,
                session_id,
            });
    }
}

/// A session request captured by [`RecordingAutomationSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSessionRequest {
    /// Task that entered the automated step.
    pub task_id: TaskId,
    /// Step whose entry action fired.
    pub step: Step,
    /// Description the session-creation flow should seed from.
    pub task_description: String,
}

/// Recording sink for automation session requests.
#[derive(Debug, Default)]
pub struct RecordingAutomationSink {
    requests: Mutex<Vec<RecordedSessionRequest>>,
}

impl RecordingAutomationSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded session request.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedSessionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AutomationSink for RecordingAutomationSink {
    fn agent_session_wanted(&self, task_id: TaskId, step: &Step, task_description: &str) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedSessionRequest {
                task_id,
                step: step.clone(),
                task_description: task_description.to_owned(),
            });
    }
}
