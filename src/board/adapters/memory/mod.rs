//! In-memory adapter implementations.

mod remote;
mod snapshots;

pub use remote::{
    InMemoryBoardRemote, InMemorySessionLauncher, RecordedMoveFailure, RecordedSessionRequest,
    RecordingAutomationSink, RecordingFailureSink,
};
pub use snapshots::InMemorySnapshotStore;
