//! Schema and snapshot codec error types.

use thiserror::Error;

/// Errors that can occur while exporting or importing schemas and snapshots
#[derive(Debug, Error)]
pub enum CodecError {
    /// Snapshot export or import attempted without a context codec
    #[error("No context codec configured")]
    NoCodecConfigured,

    /// The state parser did not recognise a serialized state
    #[error("Unknown state: {name}")]
    UnknownState { name: String },

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary serialization or deserialization failed
    #[error("Binary encoding error: {0}")]
    Binary(#[from] bincode::Error),

    /// The context codec could not encode or decode the context
    #[error("Context codec failed: {0}")]
    Context(String),
}
