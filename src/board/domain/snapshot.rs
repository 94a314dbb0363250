//! Cached per-pipeline board snapshot.

use super::{BoardDomainError, PipelineId, Step, StepId, Task, TaskId};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The cached `{ steps, tasks }` pair for one pipeline.
///
/// Tasks are kept as a flat list addressed by id with a `step_id` foreign
/// key, so "tasks currently in step X" is a filter rather than a graph
/// traversal. All mutation happens by whole-list replacement, which makes a
/// rollback point a cheap copy of the prior list rather than an alias into
/// live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pipeline_id: PipelineId,
    steps: Vec<Step>,
    tasks: Vec<Task>,
}

/// Result of deriving a move from a snapshot: the post-move task list and
/// the relocated task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedMove {
    /// Full task list with the moving task relocated.
    pub tasks: Vec<Task>,
    /// The relocated task.
    pub moved: Task,
}

impl Snapshot {
    /// Creates a validated snapshot from hydrated storage data.
    ///
    /// Steps are re-sorted by pipeline position. Validation enforces the
    /// initial-load invariants: every task references a step present in the
    /// snapshot, and the tasks within each step occupy the contiguous
    /// positions `0..n-1`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownStep`] for a dangling step
    /// reference and [`BoardDomainError::NonContiguousPositions`] when a
    /// step's ordering has gaps or duplicates.
    pub fn new(
        pipeline_id: PipelineId,
        mut steps: Vec<Step>,
        tasks: Vec<Task>,
    ) -> Result<Self, BoardDomainError> {
        steps.sort_by_key(Step::position);

        for task in &tasks {
            if !steps.iter().any(|step| step.id() == task.step_id()) {
                return Err(BoardDomainError::UnknownStep {
                    task_id: task.id(),
                    step_id: task.step_id(),
                });
            }
        }

        let mut positions_by_step: HashMap<StepId, Vec<u32>> = HashMap::new();
        for task in &tasks {
            positions_by_step
                .entry(task.step_id())
                .or_default()
                .push(task.position());
        }
        for (step_id, mut positions) in positions_by_step {
            positions.sort_unstable();
            let expected = (0u32..).take(positions.len());
            if !positions.iter().copied().eq(expected) {
                return Err(BoardDomainError::NonContiguousPositions { step_id });
            }
        }

        Ok(Self {
            pipeline_id,
            steps,
            tasks,
        })
    }

    /// Returns the pipeline this snapshot belongs to.
    #[must_use]
    pub const fn pipeline_id(&self) -> PipelineId {
        self.pipeline_id
    }

    /// Returns the pipeline's steps in board order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the flat task list.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a step by identifier.
    #[must_use]
    pub fn step(&self, step_id: StepId) -> Option<&Step> {
        self.steps.iter().find(|step| step.id() == step_id)
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns the tasks currently in the given step, ordered by position.
    #[must_use]
    pub fn tasks_in_step(&self, step_id: StepId) -> Vec<&Task> {
        let mut in_step: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.step_id() == step_id)
            .collect();
        in_step.sort_by_key(|task| task.position());
        in_step
    }

    /// Derives the task list that results from relocating one task.
    ///
    /// The returned list is a fresh vector; the snapshot itself is not
    /// touched, so the caller can capture the current list as a rollback
    /// value before committing the derived one. Remaining source-step tasks
    /// keep their existing positions (gaps are tolerated between loads).
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownTask`] when the task is not part
    /// of this snapshot and [`BoardDomainError::UnknownTargetStep`] when the
    /// target step is not.
    pub fn derive_move(
        &self,
        task_id: TaskId,
        target_step_id: StepId,
        target_position: u32,
        clock: &impl Clock,
    ) -> Result<DerivedMove, BoardDomainError> {
        if self.step(target_step_id).is_none() {
            return Err(BoardDomainError::UnknownTargetStep(target_step_id));
        }
        let current = self
            .task(task_id)
            .ok_or(BoardDomainError::UnknownTask(task_id))?;
        let moved = current.moved_to(target_step_id, target_position, clock);

        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id() == task_id {
                    moved.clone()
                } else {
                    task.clone()
                }
            })
            .collect();

        Ok(DerivedMove { tasks, moved })
    }

    /// Replaces the task list wholesale.
    ///
    /// Used for the optimistic write, for rollback, and for reconciling a
    /// server-confirmed task. No density re-validation happens here; the
    /// initial-load invariant is enforced only by [`Snapshot::new`].
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }
}
