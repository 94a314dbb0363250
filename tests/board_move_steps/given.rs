//! Given steps for board move BDD scenarios.

use eyre::eyre;
use gantry::board::domain::{Step, StepId, Task, TaskId, TaskRecord, TaskStatus};
use gantry::board::services::MovePolicy;
use mockable::{Clock, DefaultClock};
use rstest_bdd_macros::given;

use super::world::{BoardMoveWorld, RemoteScript};

#[given(r#"a pipeline with steps "{first}", "{second}" and "{third}""#)]
fn pipeline_with_steps(
    world: &mut BoardMoveWorld,
    first: String,
    second: String,
    third: String,
) -> Result<(), eyre::Report> {
    let colours = ["#7bd88f", "#5ad4e6", "#fd9353"];
    for (position, (title, colour)) in [first, second, third]
        .into_iter()
        .zip(colours)
        .enumerate()
    {
        let rank = u32::try_from(position)?;
        let step = Step::new(StepId::new(), title, colour, rank)
            .map_err(|err| eyre!("invalid step in scenario: {err}"))?;
        world.steps.push(step);
    }
    Ok(())
}

#[given(r#"a task "{title}" in step "{step_title}""#)]
fn task_in_step(
    world: &mut BoardMoveWorld,
    title: String,
    step_title: String,
) -> Result<(), eyre::Report> {
    let step_id = world
        .step_by_title(&step_title)
        .map(Step::id)
        .ok_or_else(|| eyre!("unknown step in scenario: {step_title}"))?;
    let position = u32::try_from(
        world
            .tasks
            .iter()
            .filter(|task| task.step_id() == step_id)
            .count(),
    )?;
    let clock = DefaultClock;
    world.tasks.push(Task::from_record(TaskRecord {
        id: TaskId::new(),
        title,
        step_id,
        position,
        status: TaskStatus::InProgress,
        primary_session_id: None,
        created_at: clock.utc(),
        updated_at: clock.utc(),
    }));
    Ok(())
}

#[given("the remote store will confirm the next move")]
fn remote_confirms(world: &mut BoardMoveWorld) {
    world.remote_script = RemoteScript::Confirm;
}

#[given(r#"the remote store will reject the next move with "{message}""#)]
fn remote_rejects(world: &mut BoardMoveWorld, message: String) {
    world.remote_script = RemoteScript::Reject(message);
}

#[given("the board only permits adjacent moves")]
fn adjacent_only(world: &mut BoardMoveWorld) {
    world.policy = MovePolicy::AdjacentOnly;
}
