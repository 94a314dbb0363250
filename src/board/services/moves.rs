//! Optimistic move service: local mutation, remote confirmation, rollback.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use mockable::Clock;

use crate::board::domain::{PipelineId, StepId, Task, TaskId};
use crate::board::ports::{
    AutomationSink, BoardRemote, MoveFailureSink, MoveTaskRequest, SessionLauncher, SnapshotStore,
};
use crate::board::services::{automation::AutomationTrigger, placement};
use crate::cancel::CancellationToken;

/// Why a gesture or move was dropped without any mutation or RPC.
///
/// Every variant is recovered silently: the snapshot is untouched, no
/// request is issued, and no sink fires. Callers that want to surface a
/// lightweight signal can match on the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureRejection {
    /// A drop arrived with no active drag session.
    NoActiveDrag,
    /// A pick-up arrived while another gesture was active.
    DragInProgress,
    /// The task already has a move awaiting remote confirmation.
    MoveInFlight,
    /// No snapshot is cached for the pipeline.
    MissingSnapshot,
    /// The task is not part of the cached snapshot.
    UnknownTask,
    /// The target step is not part of the cached snapshot.
    UnknownStep,
    /// The drop target is the task's current step.
    SelfMove,
    /// The target is not adjacent to the source under the constrained
    /// presentation.
    NotAdjacent,
    /// The gesture's cancellation token fired before anything was mutated.
    Cancelled,
}

/// Terminal outcome of one attempted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResolution {
    /// The gesture was dropped silently; nothing changed anywhere.
    Ignored(GestureRejection),
    /// The authoritative store confirmed the move; the returned task is the
    /// server-committed value.
    Committed(Task),
    /// The remote rejected the move; the snapshot was restored to its
    /// pre-move task list and the failure sink has fired.
    RolledBack {
        /// Best-effort remote error message.
        message: String,
    },
}

/// RAII reservation marking a task's move as in flight.
///
/// At most one reservation exists per task at any time; dropping it frees
/// the task for the next gesture.
struct InFlightReservation {
    tasks: Arc<Mutex<HashSet<TaskId>>>,
    task_id: TaskId,
}

impl InFlightReservation {
    fn acquire(tasks: &Arc<Mutex<HashSet<TaskId>>>, task_id: TaskId) -> Option<Self> {
        let mut reserved = tasks.lock().unwrap_or_else(PoisonError::into_inner);
        if !reserved.insert(task_id) {
            return None;
        }
        Some(Self {
            tasks: Arc::clone(tasks),
            task_id,
        })
    }
}

impl Drop for InFlightReservation {
    fn drop(&mut self) {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.task_id);
    }
}

/// Orchestrates a single task move end to end.
///
/// The sequence is: reserve the task, compute the append position, derive
/// the post-move task list from the current snapshot, capture the prior
/// list as the rollback value, write the new list optimistically, confirm
/// with the authoritative store, then either reconcile and run automation
/// or restore the rollback value and notify the failure sink.
#[derive(Clone)]
pub struct TaskMoveService<S, R, L, A, F, C>
where
    S: SnapshotStore,
    R: BoardRemote,
    L: SessionLauncher,
    A: AutomationSink,
    F: MoveFailureSink,
    C: Clock + Send + Sync,
{
    snapshots: Arc<S>,
    remote: Arc<R>,
    automation: AutomationTrigger<L, A>,
    failure_sink: Arc<F>,
    clock: Arc<C>,
    in_flight: Arc<Mutex<HashSet<TaskId>>>,
}

impl<S, R, L, A, F, C> TaskMoveService<S, R, L, A, F, C>
where
    S: SnapshotStore,
    R: BoardRemote,
    L: SessionLauncher,
    A: AutomationSink,
    F: MoveFailureSink,
    C: Clock + Send + Sync,
{
    /// Creates a new move service.
    #[must_use]
    pub fn new(
        snapshots: Arc<S>,
        remote: Arc<R>,
        automation: AutomationTrigger<L, A>,
        failure_sink: Arc<F>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            snapshots,
            remote,
            automation,
            failure_sink,
            clock,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Returns whether the task has a move awaiting remote confirmation.
    #[must_use]
    pub fn is_move_in_flight(&self, task_id: TaskId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&task_id)
    }

    /// Moves `task_id` to the tail of `target_step_id`, optimistically.
    ///
    /// The local snapshot is updated before the remote call; on remote
    /// failure the task list current at failure time is replaced with the
    /// captured rollback value, so interleaved updates to other pipelines
    /// are never clobbered. Automation runs only after the remote has
    /// confirmed.
    pub async fn move_task(
        &self,
        pipeline_id: PipelineId,
        task_id: TaskId,
        target_step_id: StepId,
        cancel: CancellationToken,
    ) -> MoveResolution {
        let Some(_reservation) = InFlightReservation::acquire(&self.in_flight, task_id) else {
            tracing::debug!(%task_id, "move ignored: prior move still in flight");
            return MoveResolution::Ignored(GestureRejection::MoveInFlight);
        };

        let snapshot = match self.snapshots.current(pipeline_id).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::debug!(%pipeline_id, "move ignored: no cached snapshot");
                return MoveResolution::Ignored(GestureRejection::MissingSnapshot);
            }
            Err(err) => {
                tracing::warn!(%pipeline_id, error = %err, "snapshot read failed; move ignored");
                return MoveResolution::Ignored(GestureRejection::MissingSnapshot);
            }
        };

        let Some(current) = snapshot.task(task_id) else {
            tracing::debug!(%task_id, "move ignored: task not in snapshot");
            return MoveResolution::Ignored(GestureRejection::UnknownTask);
        };
        if current.step_id() == target_step_id {
            return MoveResolution::Ignored(GestureRejection::SelfMove);
        }
        if cancel.is_cancelled() {
            return MoveResolution::Ignored(GestureRejection::Cancelled);
        }

        let target_position = placement::next_position(&snapshot, target_step_id, task_id);
        let derived =
            match snapshot.derive_move(task_id, target_step_id, target_position, &*self.clock) {
                Ok(derived) => derived,
                Err(err) => {
                    tracing::debug!(%task_id, error = %err, "move ignored: derivation rejected");
                    return MoveResolution::Ignored(GestureRejection::UnknownStep);
                }
            };
        let rollback_tasks = snapshot.tasks().to_vec();

        if !self.write_tasks(pipeline_id, derived.tasks).await {
            return MoveResolution::Ignored(GestureRejection::MissingSnapshot);
        }

        let request = MoveTaskRequest::new(task_id, pipeline_id, target_step_id, target_position);
        match self.remote.move_task(request, cancel.clone()).await {
            Ok(confirmation) => {
                self.reconcile(pipeline_id, &confirmation.task).await;
                self.automation
                    .on_step_entered(&confirmation.task, &confirmation.step, cancel)
                    .await;
                MoveResolution::Committed(confirmation.task)
            }
            Err(err) => {
                if !self.write_tasks(pipeline_id, rollback_tasks).await {
                    tracing::warn!(%pipeline_id, "snapshot gone before rollback; nothing restored");
                }
                let message = err.to_string();
                self.failure_sink
                    .move_failed(&message, task_id, derived.moved.primary_session_id());
                MoveResolution::RolledBack { message }
            }
        }
    }

    /// Replaces the pipeline's task list, reporting whether a snapshot was
    /// present to receive it.
    async fn write_tasks(&self, pipeline_id: PipelineId, tasks: Vec<Task>) -> bool {
        match self.snapshots.replace_tasks(pipeline_id, tasks).await {
            Ok(replaced) => replaced,
            Err(err) => {
                tracing::warn!(%pipeline_id, error = %err, "snapshot write failed");
                false
            }
        }
    }

    /// Folds the server-confirmed task into the snapshot current at
    /// confirmation time. A no-op when the optimistic value already
    /// matches or the snapshot has been discarded mid-flight.
    async fn reconcile(&self, pipeline_id: PipelineId, confirmed: &Task) {
        let Ok(Some(snapshot)) = self.snapshots.current(pipeline_id).await else {
            return;
        };
        let Some(cached) = snapshot.task(confirmed.id()) else {
            return;
        };
        if cached == confirmed {
            return;
        }
        let tasks = snapshot
            .tasks()
            .iter()
            .map(|task| {
                if task.id() == confirmed.id() {
                    confirmed.clone()
                } else {
                    task.clone()
                }
            })
            .collect();
        if !self.write_tasks(pipeline_id, tasks).await {
            tracing::debug!(%pipeline_id, "snapshot gone before reconcile");
        }
    }
}
