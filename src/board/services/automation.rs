//! Stage-entry automation for confirmed moves.

use std::sync::Arc;
use std::time::Duration;

use crate::board::domain::{Step, Task};
use crate::board::ports::{AutomationSink, SessionLauncher, StartSessionRequest};
use crate::cancel::CancellationToken;

/// Caller-side deadline for the session-start request.
pub const SESSION_START_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Runs the destination step's entry actions after a confirmed move.
///
/// Automation is a best-effort side channel: it only runs once the move RPC
/// has succeeded, and none of its failures ever roll back the committed
/// move or reach the move-failure sink.
#[derive(Clone)]
pub struct AutomationTrigger<L, A>
where
    L: SessionLauncher,
    A: AutomationSink,
{
    launcher: Arc<L>,
    sink: Arc<A>,
}

impl<L, A> AutomationTrigger<L, A>
where
    L: SessionLauncher,
    A: AutomationSink,
{
    /// Creates a new automation trigger.
    #[must_use]
    pub const fn new(launcher: Arc<L>, sink: Arc<A>) -> Self {
        Self { launcher, sink }
    }

    /// Inspects `step`'s entry actions and issues the auto-start side
    /// effect for `task`.
    ///
    /// With an attached session the launcher is called, bounded by
    /// [`SESSION_START_TIMEOUT`]; failures and timeouts are logged and
    /// swallowed. Without a session no RPC is made; the automation sink is
    /// asked to open a session-creation flow instead. Steps without an
    /// auto-start action are a no-op.
    pub async fn on_step_entered(&self, task: &Task, step: &Step, cancel: CancellationToken) {
        if step.auto_start_action().is_none() {
            return;
        }

        match task.primary_session_id() {
            Some(session_id) => {
                let request = StartSessionRequest::new(task.id(), session_id, step.id());
                let bounded =
                    tokio::time::timeout(SESSION_START_TIMEOUT, self.launcher.start_session(request, cancel));
                match bounded.await {
                    Ok(Ok(())) => {
                        tracing::debug!(task_id = %task.id(), session_id = %session_id, "auto-started session");
                    }
                    Ok(Err(err)) => {
                        tracing::warn!(task_id = %task.id(), session_id = %session_id, error = %err, "session auto-start failed");
                    }
                    Err(_elapsed) => {
                        tracing::warn!(task_id = %task.id(), session_id = %session_id, "session auto-start timed out");
                    }
                }
            }
            None => {
                self.sink
                    .agent_session_wanted(task.id(), step, task.title());
            }
        }
    }
}
