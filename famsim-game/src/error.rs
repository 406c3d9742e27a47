//! Error kinds surfaced by the interaction core.

use crate::activity::ActivityKind;
use thiserror::Error;

/// Failures of an engine round-trip.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The request never produced a usable response: network failure,
    /// non-success protocol status or a malformed payload.
    #[error("{0}")]
    Transport(String),
    /// The engine answered with a structured failure and a readable message.
    #[error("{0}")]
    Application(String),
}

impl EngineError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::Application(message.into())
    }

    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("malformed response: {err}"))
    }
}

/// Local input problems caught before anything reaches the engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be a positive integer (got '{0}')")]
    InvalidAmount(String),
    #[error("save name '{0}' contains unsupported characters")]
    InvalidSaveName(String),
}

/// Misuse of the orchestrator by the front end. Engine failures never show
/// up here; they become dialogs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("no game is loaded")]
    NoGameLoaded,
    #[error("activity {0} is disabled for the current player")]
    ActivityDisabled(ActivityKind),
    #[error("another activity flow is still in progress")]
    FlowInProgress,
    #[error("no activity flow is waiting for that step")]
    NoPendingStep,
    #[error("no dialog is open")]
    NoDialog,
    #[error("dialog has no button {index}")]
    NoSuchButton { index: usize },
    #[error("the open dialog has no input field")]
    NoInputField,
}
