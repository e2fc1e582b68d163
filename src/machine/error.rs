//! Errors raised while firing transitions.

use thiserror::Error;

/// Error returned by interceptors and callbacks supplied by the embedder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for callbacks.
pub type HookResult = Result<(), HookError>;

/// Errors that can occur when firing a transition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Transition not found: {name}")]
    UnknownTransition { name: String },

    #[error("Transition '{name}' starts in '{expected}' but the machine is in '{actual}'")]
    WrongStartState {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Guard rejected transition '{name}'")]
    GuardRejected { name: String },

    #[error("Hook failed: {0}")]
    Hook(#[from] HookError),
}
