//! Task aggregate root and task status types.

use super::{BoardDomainError, ParseTaskStatusError, SessionId, StepId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task workflow status.
///
/// The move core carries the status between snapshots but never branches on
/// it; transitions are owned by external lifecycle flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is waiting to be picked up.
    Backlog,
    /// Task is being worked on.
    InProgress,
    /// Task is awaiting review.
    InReview,
    /// Task has been completed.
    Done,
    /// Task has been abandoned.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "in_progress" => Ok(Self::InProgress),
            "in_review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
///
/// `position` is a dense integer rank among the tasks sharing the same
/// `step_id`. Moves never mutate a task in place; [`Task::moved_to`] returns
/// an updated copy so a snapshot's task list can be replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    step_id: StepId,
    position: u32,
    status: TaskStatus,
    primary_session_id: Option<SessionId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a hydrated task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Step currently holding the task.
    pub step_id: StepId,
    /// Rank within the holding step.
    pub position: u32,
    /// Workflow status.
    pub status: TaskStatus,
    /// Agent session attached to the task, if any.
    pub primary_session_id: Option<SessionId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a freshly placed task at the tail of the given step.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is blank.
    pub fn new(
        title: impl Into<String>,
        step_id: StepId,
        position: u32,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            step_id,
            position,
            status: TaskStatus::Backlog,
            primary_session_id: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from hydrated storage data.
    #[must_use]
    pub fn from_record(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            step_id: record.step_id,
            position: record.position,
            status: record.status,
            primary_session_id: record.primary_session_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the step currently holding the task.
    #[must_use]
    pub const fn step_id(&self) -> StepId {
        self.step_id
    }

    /// Returns the task's rank within its step.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the attached agent session, if any.
    #[must_use]
    pub const fn primary_session_id(&self) -> Option<SessionId> {
        self.primary_session_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a copy of this task relocated to the given step and rank.
    #[must_use]
    pub fn moved_to(&self, step_id: StepId, position: u32, clock: &impl Clock) -> Self {
        let mut moved = self.clone();
        moved.step_id = step_id;
        moved.position = position;
        moved.updated_at = clock.utc();
        moved
    }

    /// Returns a copy of this task with an agent session attached.
    ///
    /// Session creation itself is an external flow; the core only records
    /// the association once the caller reports it.
    #[must_use]
    pub fn with_primary_session(&self, session_id: SessionId, clock: &impl Clock) -> Self {
        let mut updated = self.clone();
        updated.primary_session_id = Some(session_id);
        updated.updated_at = clock.utc();
        updated
    }
}
