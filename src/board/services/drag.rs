//! Drag-session coordination: pick-up, drop, cancel.

use std::sync::{Arc, Mutex, PoisonError};

use mockable::Clock;

use crate::board::domain::{PipelineId, StepId, TaskId};
use crate::board::ports::{
    AutomationSink, BoardRemote, MoveFailureSink, SessionLauncher, SnapshotStore,
};
use crate::board::services::adjacency;
use crate::board::services::moves::{GestureRejection, MoveResolution, TaskMoveService};
use crate::cancel::CancellationToken;

/// Which drop targets a presentation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePolicy {
    /// The free board presentation: any step is a valid target.
    AnyStep,
    /// The constrained presentation: only steps adjacent, in pipeline
    /// order, to the task's current step.
    AdjacentOnly,
}

/// The transient state of one drag gesture, alive between pick-up and
/// drop or cancel. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pipeline_id: PipelineId,
    task_id: TaskId,
    source_step_id: StepId,
}

impl DragSession {
    /// Returns the pipeline the gesture is operating on.
    #[must_use]
    pub const fn pipeline_id(&self) -> PipelineId {
        self.pipeline_id
    }

    /// Returns the task being dragged.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the step the task was picked up from.
    #[must_use]
    pub const fn source_step_id(&self) -> StepId {
        self.source_step_id
    }
}

/// Result of a pick-up attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickUpOutcome {
    /// The gesture started; the session is now active.
    Started(DragSession),
    /// The gesture was silently ignored.
    Ignored(GestureRejection),
}

#[derive(Debug, Clone, Copy)]
enum DragPhase {
    Idle,
    Dragging(DragSession),
}

/// Coordinates one drag gesture at a time over the move pipeline.
///
/// Pick-up captures the task and its source step without touching state or
/// the network. Drop validates (self-move, adjacency under the constrained
/// policy, per-task in-flight guard) and then hands the move to
/// [`TaskMoveService`]. Cancel returns to idle synchronously with zero side
/// effects. Rejections are silent: no callback fires and nothing mutates.
pub struct DragCoordinator<S, R, L, A, F, C>
where
    S: SnapshotStore,
    R: BoardRemote,
    L: SessionLauncher,
    A: AutomationSink,
    F: MoveFailureSink,
    C: Clock + Send + Sync,
{
    moves: Arc<TaskMoveService<S, R, L, A, F, C>>,
    snapshots: Arc<S>,
    policy: MovePolicy,
    phase: Mutex<DragPhase>,
}

impl<S, R, L, A, F, C> DragCoordinator<S, R, L, A, F, C>
where
    S: SnapshotStore,
    R: BoardRemote,
    L: SessionLauncher,
    A: AutomationSink,
    F: MoveFailureSink,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator over the given move service and policy.
    #[must_use]
    pub fn new(
        moves: Arc<TaskMoveService<S, R, L, A, F, C>>,
        snapshots: Arc<S>,
        policy: MovePolicy,
    ) -> Self {
        Self {
            moves,
            snapshots,
            policy,
            phase: Mutex::new(DragPhase::Idle),
        }
    }

    /// Returns the active drag session, if a gesture is in progress.
    #[must_use]
    pub fn active(&self) -> Option<DragSession> {
        match *self.phase.lock().unwrap_or_else(PoisonError::into_inner) {
            DragPhase::Dragging(session) => Some(session),
            DragPhase::Idle => None,
        }
    }

    /// Starts a drag gesture for `task_id` on `pipeline_id`.
    ///
    /// No mutation and no network call happen here. The gesture is ignored
    /// when another gesture is active, when the task already has a move in
    /// flight, when the pipeline has no cached snapshot, or when the task
    /// is not part of it.
    pub async fn pick_up(&self, pipeline_id: PipelineId, task_id: TaskId) -> PickUpOutcome {
        if self.active().is_some() {
            tracing::debug!(%task_id, "pick-up ignored: another gesture is active");
            return PickUpOutcome::Ignored(GestureRejection::DragInProgress);
        }
        if self.moves.is_move_in_flight(task_id) {
            tracing::debug!(%task_id, "pick-up ignored: prior move still in flight");
            return PickUpOutcome::Ignored(GestureRejection::MoveInFlight);
        }

        let snapshot = match self.snapshots.current(pipeline_id).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return PickUpOutcome::Ignored(GestureRejection::MissingSnapshot),
            Err(err) => {
                tracing::warn!(%pipeline_id, error = %err, "snapshot read failed; pick-up ignored");
                return PickUpOutcome::Ignored(GestureRejection::MissingSnapshot);
            }
        };
        let Some(task) = snapshot.task(task_id) else {
            return PickUpOutcome::Ignored(GestureRejection::UnknownTask);
        };

        let session = DragSession {
            pipeline_id,
            task_id,
            source_step_id: task.step_id(),
        };
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(*phase, DragPhase::Dragging(_)) {
            return PickUpOutcome::Ignored(GestureRejection::DragInProgress);
        }
        *phase = DragPhase::Dragging(session);
        PickUpOutcome::Started(session)
    }

    /// Aborts the active gesture, synchronously and with zero side effects.
    ///
    /// Returns the session that was cancelled, if any gesture was active.
    pub fn cancel(&self) -> Option<DragSession> {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        match *phase {
            DragPhase::Dragging(session) => {
                *phase = DragPhase::Idle;
                Some(session)
            }
            DragPhase::Idle => None,
        }
    }

    /// Drops the dragged task onto `target_step_id` and resolves the move.
    ///
    /// A drop on the source step is a self-move no-op with no RPC. Under
    /// [`MovePolicy::AdjacentOnly`], a non-adjacent target is rejected with
    /// no state change and no user-visible feedback. Whatever the outcome,
    /// the coordinator is idle again when this returns.
    pub async fn drop_on(
        &self,
        target_step_id: StepId,
        cancel: CancellationToken,
    ) -> MoveResolution {
        let Some(session) = self.take_active() else {
            return MoveResolution::Ignored(GestureRejection::NoActiveDrag);
        };

        if target_step_id == session.source_step_id {
            tracing::debug!(task_id = %session.task_id, "drop ignored: self-move");
            return MoveResolution::Ignored(GestureRejection::SelfMove);
        }

        if self.policy == MovePolicy::AdjacentOnly {
            let snapshot = match self.snapshots.current(session.pipeline_id).await {
                Ok(Some(snapshot)) => snapshot,
                Ok(None) | Err(_) => {
                    return MoveResolution::Ignored(GestureRejection::MissingSnapshot);
                }
            };
            if !adjacency::is_adjacent(snapshot.steps(), session.source_step_id, target_step_id) {
                tracing::debug!(
                    task_id = %session.task_id,
                    target_step_id = %target_step_id,
                    "drop ignored: target not adjacent"
                );
                return MoveResolution::Ignored(GestureRejection::NotAdjacent);
            }
        }

        self.moves
            .move_task(session.pipeline_id, session.task_id, target_step_id, cancel)
            .await
    }

    /// Takes the active session, returning the coordinator to idle.
    fn take_active(&self) -> Option<DragSession> {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        match *phase {
            DragPhase::Dragging(session) => {
                *phase = DragPhase::Idle;
                Some(session)
            }
            DragPhase::Idle => None,
        }
    }
}
