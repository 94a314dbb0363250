//! Port contracts for board move coordination.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod notifications;
pub mod remote;
pub mod sessions;
pub mod snapshots;

pub use notifications::{AutomationSink, MoveFailureSink};
pub use remote::{BoardRemote, MoveTaskConfirmation, MoveTaskRequest, RemoteError, RemoteResult};
pub use sessions::{SessionLauncher, StartSessionRequest};
pub use snapshots::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult};
