//! Then steps for board move BDD scenarios.

use eyre::eyre;
use gantry::board::domain::{Step, Task};
use gantry::board::ports::SnapshotStore;
use gantry::board::services::MoveResolution;
use rstest_bdd_macros::then;

use super::world::{BoardMoveWorld, run_async};

fn last_resolution(world: &BoardMoveWorld) -> Result<&MoveResolution, eyre::Report> {
    world
        .last_resolution
        .as_ref()
        .ok_or_else(|| eyre!("no move was attempted in this scenario"))
}

fn current_tasks(world: &BoardMoveWorld) -> Result<Vec<Task>, eyre::Report> {
    let snapshot = run_async(world.snapshots.current(world.pipeline_id))
        .map_err(|err| eyre!("snapshot read failed: {err}"))?
        .ok_or_else(|| eyre!("no snapshot cached for the scenario pipeline"))?;
    Ok(snapshot.tasks().to_vec())
}

#[then("the move is committed")]
fn move_is_committed(world: &BoardMoveWorld) -> Result<(), eyre::Report> {
    let resolution = last_resolution(world)?;
    if !matches!(resolution, MoveResolution::Committed(_)) {
        return Err(eyre!("expected a committed move, got {resolution:?}"));
    }
    Ok(())
}

#[then("the move is rolled back")]
fn move_is_rolled_back(world: &BoardMoveWorld) -> Result<(), eyre::Report> {
    let resolution = last_resolution(world)?;
    if !matches!(resolution, MoveResolution::RolledBack { .. }) {
        return Err(eyre!("expected a rolled-back move, got {resolution:?}"));
    }
    Ok(())
}

#[then("the gesture is ignored")]
fn gesture_is_ignored(world: &BoardMoveWorld) -> Result<(), eyre::Report> {
    let resolution = last_resolution(world)?;
    if !matches!(resolution, MoveResolution::Ignored(_)) {
        return Err(eyre!("expected an ignored gesture, got {resolution:?}"));
    }
    Ok(())
}

#[then(r#"step "{title}" holds tasks "{expected}" in order"#)]
fn step_holds_tasks_in_order(
    world: &BoardMoveWorld,
    title: String,
    expected: String,
) -> Result<(), eyre::Report> {
    let step_id = world
        .step_by_title(&title)
        .map(Step::id)
        .ok_or_else(|| eyre!("unknown step in scenario: {title}"))?;
    let snapshot = run_async(world.snapshots.current(world.pipeline_id))
        .map_err(|err| eyre!("snapshot read failed: {err}"))?
        .ok_or_else(|| eyre!("no snapshot cached for the scenario pipeline"))?;
    let titles: Vec<String> = snapshot
        .tasks_in_step(step_id)
        .into_iter()
        .map(|task| task.title().to_owned())
        .collect();
    let wanted: Vec<String> = expected
        .split(',')
        .map(|part| part.trim().to_owned())
        .collect();
    if titles != wanted {
        return Err(eyre!("expected {wanted:?} in step {title}, found {titles:?}"));
    }
    Ok(())
}

#[then(r#"step "{title}" holds no tasks"#)]
fn step_holds_no_tasks(world: &BoardMoveWorld, title: String) -> Result<(), eyre::Report> {
    let step_id = world
        .step_by_title(&title)
        .map(Step::id)
        .ok_or_else(|| eyre!("unknown step in scenario: {title}"))?;
    let snapshot = run_async(world.snapshots.current(world.pipeline_id))
        .map_err(|err| eyre!("snapshot read failed: {err}"))?
        .ok_or_else(|| eyre!("no snapshot cached for the scenario pipeline"))?;
    let remaining = snapshot.tasks_in_step(step_id);
    if !remaining.is_empty() {
        return Err(eyre!("expected step {title} to be empty, found {remaining:?}"));
    }
    Ok(())
}

#[then("the board matches its pre-move state")]
fn board_matches_pre_move_state(world: &BoardMoveWorld) -> Result<(), eyre::Report> {
    let before = world
        .pre_move_tasks
        .as_ref()
        .ok_or_else(|| eyre!("no pre-move state captured"))?;
    let after = current_tasks(world)?;
    if &after != before {
        return Err(eyre!("board diverged from pre-move state: {after:?}"));
    }
    Ok(())
}

#[then(r#"the move failure callback fired once with "{message}""#)]
fn failure_callback_fired_once(
    world: &BoardMoveWorld,
    message: String,
) -> Result<(), eyre::Report> {
    let failures = world.failures.failures();
    if failures.len() != 1 {
        return Err(eyre!("expected one failure callback, saw {}", failures.len()));
    }
    let failure = failures
        .first()
        .ok_or_else(|| eyre!("failure list unexpectedly empty"))?;
    if failure.message != message {
        return Err(eyre!(
            "expected failure message {message:?}, got {:?}",
            failure.message
        ));
    }
    Ok(())
}

#[then("no move request reached the remote store")]
fn no_move_request_reached_remote(world: &BoardMoveWorld) -> Result<(), eyre::Report> {
    let requests = world.remote.requests();
    if !requests.is_empty() {
        return Err(eyre!("expected no remote requests, saw {requests:?}"));
    }
    Ok(())
}
