//! Pipeline step definition and stage-entry actions.

use super::{BoardDomainError, StepId};
use serde::{Deserialize, Serialize};

/// Kind of side effect configured to run when a task enters a step.
///
/// Only [`EntryActionKind::AutoStartAgent`] is interpreted by this core;
/// every other kind is carried through untouched for outer layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryActionKind {
    /// Start (or request) an agent session for the entering task.
    AutoStartAgent,
    /// Any kind this core does not recognise.
    #[serde(other)]
    Unrecognised,
}

impl EntryActionKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutoStartAgent => "auto-start-agent",
            Self::Unrecognised => "unrecognised",
        }
    }
}

/// A configured side effect attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryAction {
    kind: EntryActionKind,
    #[serde(default)]
    config: serde_json::Value,
}

impl EntryAction {
    /// Creates an entry action of the given kind with an opaque config.
    #[must_use]
    pub const fn new(kind: EntryActionKind, config: serde_json::Value) -> Self {
        Self { kind, config }
    }

    /// Creates an auto-start action with no configuration.
    #[must_use]
    pub const fn auto_start() -> Self {
        Self {
            kind: EntryActionKind::AutoStartAgent,
            config: serde_json::Value::Null,
        }
    }

    /// Returns the action kind.
    #[must_use]
    pub const fn kind(&self) -> EntryActionKind {
        self.kind
    }

    /// Returns the opaque action configuration.
    #[must_use]
    pub const fn config(&self) -> &serde_json::Value {
        &self.config
    }
}

/// A named stage in a pipeline that tasks occupy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    id: StepId,
    title: String,
    #[serde(rename = "color")]
    colour: String,
    position: u32,
    entry_actions: Vec<EntryAction>,
}

impl Step {
    /// Creates a validated step definition.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyStepTitle`] when the title is blank.
    pub fn new(
        id: StepId,
        title: impl Into<String>,
        colour: impl Into<String>,
        position: u32,
    ) -> Result<Self, BoardDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BoardDomainError::EmptyStepTitle);
        }
        Ok(Self {
            id,
            title,
            colour: colour.into(),
            position,
            entry_actions: Vec::new(),
        })
    }

    /// Attaches stage-entry actions to the step.
    #[must_use]
    pub fn with_entry_actions(mut self, actions: impl IntoIterator<Item = EntryAction>) -> Self {
        self.entry_actions = actions.into_iter().collect();
        self
    }

    /// Returns the step identifier.
    #[must_use]
    pub const fn id(&self) -> StepId {
        self.id
    }

    /// Returns the step title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the display colour.
    #[must_use]
    pub fn colour(&self) -> &str {
        &self.colour
    }

    /// Returns the step's rank within the pipeline ordering.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Returns the configured stage-entry actions, in order.
    #[must_use]
    pub fn entry_actions(&self) -> &[EntryAction] {
        &self.entry_actions
    }

    /// Returns the first auto-start entry action, when one is configured.
    #[must_use]
    pub fn auto_start_action(&self) -> Option<&EntryAction> {
        self.entry_actions
            .iter()
            .find(|action| action.kind() == EntryActionKind::AutoStartAgent)
    }
}
