//! When steps for board move BDD scenarios.

use std::sync::Arc;

use eyre::eyre;
use gantry::board::domain::{Snapshot, Step, Task};
use gantry::board::ports::{MoveTaskConfirmation, SnapshotStore};
use gantry::board::services::{AutomationTrigger, DragCoordinator, TaskMoveService};
use gantry::cancel::CancellationToken;
use mockable::DefaultClock;
use rstest_bdd_macros::when;

use super::world::{BoardMoveWorld, RemoteScript, run_async};

#[when(r#"the task "{title}" is dragged onto step "{target}""#)]
fn drag_task_onto_step(
    world: &mut BoardMoveWorld,
    title: String,
    target: String,
) -> Result<(), eyre::Report> {
    let task = world
        .task_by_title(&title)
        .cloned()
        .ok_or_else(|| eyre!("unknown task in scenario: {title}"))?;
    let target_step = world
        .step_by_title(&target)
        .cloned()
        .ok_or_else(|| eyre!("unknown step in scenario: {target}"))?;

    let snapshot = Snapshot::new(
        world.pipeline_id,
        world.steps.clone(),
        world.tasks.clone(),
    )
    .map_err(|err| eyre!("invalid scenario board: {err}"))?;
    world.pre_move_tasks = Some(snapshot.tasks().to_vec());
    run_async(world.snapshots.hydrate(snapshot))
        .map_err(|err| eyre!("hydration failed: {err}"))?;

    script_remote(world, &task, &target_step);

    let service = Arc::new(TaskMoveService::new(
        Arc::clone(&world.snapshots),
        Arc::clone(&world.remote),
        AutomationTrigger::new(Arc::clone(&world.launcher), Arc::clone(&world.automation)),
        Arc::clone(&world.failures),
        Arc::new(DefaultClock),
    ));
    let coordinator =
        DragCoordinator::new(service, Arc::clone(&world.snapshots), world.policy);

    run_async(coordinator.pick_up(world.pipeline_id, task.id()));
    let resolution = run_async(coordinator.drop_on(target_step.id(), CancellationToken::new()));
    world.last_resolution = Some(resolution);
    Ok(())
}

/// Scripts the remote according to the scenario's pending script.
fn script_remote(world: &BoardMoveWorld, task: &Task, target_step: &Step) {
    match &world.remote_script {
        RemoteScript::Confirm => {
            let appended = u32::try_from(
                world
                    .tasks
                    .iter()
                    .filter(|t| t.step_id() == target_step.id() && t.id() != task.id())
                    .count(),
            )
            .unwrap_or(u32::MAX);
            let confirmed = task.moved_to(target_step.id(), appended, &DefaultClock);
            world.remote.confirm_with(MoveTaskConfirmation {
                task: confirmed,
                step: target_step.clone(),
            });
        }
        RemoteScript::Reject(message) => world.remote.fail_with(message.clone()),
    }
}
