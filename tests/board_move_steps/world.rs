//! Shared world state for board move BDD scenarios.

use std::sync::Arc;

use gantry::board::adapters::memory::{
    InMemoryBoardRemote, InMemorySessionLauncher, InMemorySnapshotStore, RecordingAutomationSink,
    RecordingFailureSink,
};
use gantry::board::domain::{PipelineId, Step, Task};
use gantry::board::services::{MovePolicy, MoveResolution};
use rstest::fixture;

/// How the scripted remote should answer the next move.
#[derive(Debug, Clone)]
pub enum RemoteScript {
    /// Confirm the move with the expected post-move task.
    Confirm,
    /// Reject the move with the given message.
    Reject(String),
}

/// Scenario world for board move behaviour tests.
pub struct BoardMoveWorld {
    pub snapshots: Arc<InMemorySnapshotStore>,
    pub remote: Arc<InMemoryBoardRemote>,
    pub launcher: Arc<InMemorySessionLauncher>,
    pub automation: Arc<RecordingAutomationSink>,
    pub failures: Arc<RecordingFailureSink>,
    pub pipeline_id: PipelineId,
    pub steps: Vec<Step>,
    pub tasks: Vec<Task>,
    pub policy: MovePolicy,
    pub remote_script: RemoteScript,
    pub pre_move_tasks: Option<Vec<Task>>,
    pub last_resolution: Option<MoveResolution>,
}

impl BoardMoveWorld {
    /// Creates a world with an empty board and a confirming remote.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshots: Arc::new(InMemorySnapshotStore::new()),
            remote: Arc::new(InMemoryBoardRemote::new()),
            launcher: Arc::new(InMemorySessionLauncher::new()),
            automation: Arc::new(RecordingAutomationSink::new()),
            failures: Arc::new(RecordingFailureSink::new()),
            pipeline_id: PipelineId::new(),
            steps: Vec::new(),
            tasks: Vec::new(),
            policy: MovePolicy::AnyStep,
            remote_script: RemoteScript::Confirm,
            pre_move_tasks: None,
            last_resolution: None,
        }
    }

    /// Looks up a configured step by title.
    pub fn step_by_title(&self, title: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.title() == title)
    }

    /// Looks up a configured task by title.
    pub fn task_by_title(&self, title: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.title() == title)
    }
}

impl Default for BoardMoveWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardMoveWorld {
    BoardMoveWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
