//! Insertion-position assignment for tasks entering a step.
//!
//! Policy: always append at the tail of the destination step's ordering;
//! mid-list insertion is not supported by this core. Source-step tasks keep
//! their existing positions after a move, so gaps can accumulate between
//! hydrations. They are tolerated: density is only enforced on the initial
//! load, and re-normalisation is left to the authoritative store.

use crate::board::domain::{Snapshot, StepId, TaskId};

/// Computes the append position for a task entering `target_step_id`.
///
/// Counts the tasks currently in the target step, excluding the moving task
/// itself so a self-move would not inflate the rank.
#[must_use]
pub fn next_position(snapshot: &Snapshot, target_step_id: StepId, moving_task_id: TaskId) -> u32 {
    let occupants = snapshot
        .tasks()
        .iter()
        .filter(|task| task.step_id() == target_step_id && task.id() != moving_task_id)
        .count();
    u32::try_from(occupants).unwrap_or(u32::MAX)
}
