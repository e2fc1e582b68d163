//! Build errors for state machine and transition builders.

use thiserror::Error;

/// Errors that can occur when building state machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Context not specified. Call .context(value) before .build()")]
    MissingContext,

    #[error("Start state not specified and no transitions to derive it from")]
    MissingStartState,

    #[error("Transition not found: {name}. Add it before attaching a guard or action")]
    UnknownTransition { name: String },

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Invalid schema: {0}")]
    InvalidSchema(#[from] serde_json::Error),

    #[error("Schema contains states the parser does not recognize: {}", names.join(", "))]
    UnparsedStates { names: Vec<String> },
}
