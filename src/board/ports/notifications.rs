//! Outbound notification ports for the surrounding UI.

use crate::board::domain::{SessionId, Step, TaskId};

/// Sink for failed moves.
///
/// Fired exactly once per failed move, after rollback has completed. This
/// is the only error class the surrounding UI must handle; validation and
/// stale-snapshot rejections never reach it.
pub trait MoveFailureSink: Send + Sync {
    /// Reports a rolled-back move with the best-effort remote message.
    fn move_failed(&self, message: &str, task_id: TaskId, session_id: Option<SessionId>);
}

/// Sink for stage-entry automation that needs a session created.
///
/// Fired when a task enters an auto-start step without an attached session;
/// the caller is expected to open its session-creation flow. Never fired
/// when a session already exists (that path goes straight to the launcher).
pub trait AutomationSink: Send + Sync {
    /// Requests a session for the task that just entered `step`.
    fn agent_session_wanted(&self, task_id: TaskId, step: &Step, task_description: &str);
}
