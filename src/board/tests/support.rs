//! Shared fixtures for board unit tests.

use mockable::{Clock, DefaultClock};

use crate::board::domain::{
    PipelineId, SessionId, Snapshot, Step, StepId, Task, TaskId, TaskRecord, TaskStatus,
};

/// A three-step pipeline with one task in each of the first two steps.
///
/// Steps are `plan -> build -> review`; `first` sits in `plan` at position
/// 0 and `second` in `build` at position 0. This is the canonical board
/// most move tests start from.
pub struct BoardFixture {
    /// Pipeline under test.
    pub pipeline_id: PipelineId,
    /// First step in pipeline order.
    pub plan: Step,
    /// Second step in pipeline order.
    pub build: Step,
    /// Third step in pipeline order.
    pub review: Step,
    /// Task starting in `plan`.
    pub first: Task,
    /// Task starting in `build`.
    pub second: Task,
    /// Validated snapshot holding the above.
    pub snapshot: Snapshot,
}

/// Builds a step with no entry actions.
pub fn step(title: &str, position: u32) -> Step {
    Step::new(StepId::new(), title, "#7bd88f", position).expect("valid step title")
}

/// Builds a task record placed in the given step.
pub fn task_in(title: &str, step_id: StepId, position: u32) -> Task {
    let clock = DefaultClock;
    Task::from_record(TaskRecord {
        id: TaskId::new(),
        title: title.to_owned(),
        step_id,
        position,
        status: TaskStatus::InProgress,
        primary_session_id: None,
        created_at: clock.utc(),
        updated_at: clock.utc(),
    })
}

/// Builds a task with an attached agent session.
pub fn task_with_session(title: &str, step_id: StepId, position: u32, session: SessionId) -> Task {
    let clock = DefaultClock;
    task_in(title, step_id, position).with_primary_session(session, &clock)
}

/// Builds the canonical three-step board.
pub fn board() -> BoardFixture {
    board_with_steps(
        step("Plan", 0),
        step("Build", 1),
        step("Review", 2),
    )
}

/// Builds the canonical board around custom step definitions.
pub fn board_with_steps(plan: Step, build: Step, review: Step) -> BoardFixture {
    let pipeline_id = PipelineId::new();
    let first = task_in("Wire the layout", plan.id(), 0);
    let second = task_in("Ship the docs", build.id(), 0);
    let snapshot = Snapshot::new(
        pipeline_id,
        vec![plan.clone(), build.clone(), review.clone()],
        vec![first.clone(), second.clone()],
    )
    .expect("fixture snapshot is valid");
    BoardFixture {
        pipeline_id,
        plan,
        build,
        review,
        first,
        second,
        snapshot,
    }
}
