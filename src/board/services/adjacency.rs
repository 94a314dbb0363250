//! Adjacency validation for the constrained board presentation.
//!
//! The constrained presentation only allows a task to move to a step
//! immediately adjacent, in pipeline order, to its current step. The
//! unconstrained presentation skips this module entirely.

use crate::board::domain::{Step, StepId};

/// Returns the identifiers of the steps adjacent to `step_id` in pipeline
/// order.
///
/// Boundary steps have a single neighbour; an unknown step has none.
#[must_use]
pub fn adjacent_steps(steps: &[Step], step_id: StepId) -> Vec<StepId> {
    let Some(index) = steps.iter().position(|step| step.id() == step_id) else {
        return Vec::new();
    };
    let mut neighbours = Vec::with_capacity(2);
    if let Some(previous) = index.checked_sub(1).and_then(|i| steps.get(i)) {
        neighbours.push(previous.id());
    }
    if let Some(next) = steps.get(index + 1) {
        neighbours.push(next.id());
    }
    neighbours
}

/// Returns whether a move from `source` to `target` crosses exactly one
/// step boundary in pipeline order.
#[must_use]
pub fn is_adjacent(steps: &[Step], source: StepId, target: StepId) -> bool {
    adjacent_steps(steps, source).contains(&target)
}
