//! Application services for board move orchestration.

pub mod adjacency;
pub mod automation;
pub mod drag;
pub mod moves;
pub mod placement;

pub use automation::{AutomationTrigger, SESSION_START_TIMEOUT};
pub use drag::{DragCoordinator, DragSession, MovePolicy, PickUpOutcome};
pub use moves::{GestureRejection, MoveResolution, TaskMoveService};
