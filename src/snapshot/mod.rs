//! Snapshot and schema serialization.
//!
//! Two independent payloads leave a machine:
//!
//! - a [`Schema`]: states, start state and transition endpoints, no behavior
//! - a [`Snapshot`]: the current state plus the context, encoded by a
//!   [`ContextCodec`] the embedder supplies
//!
//! The machine never looks inside the context; it only hands it to the codec.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

pub mod error;
pub mod schema;

pub use error::CodecError;
pub use schema::{collate, ParsedSchema, Schema, TransitionSchema};

/// Runtime snapshot: current state and opaque context payload.
///
/// # Example
///
/// ```rust
/// use turnstile::snapshot::Snapshot;
///
/// let snapshot = Snapshot {
///     state: "OPEN".to_string(),
///     context: "100".to_string(),
/// };
///
/// let json = snapshot.to_json().unwrap();
/// assert_eq!(json, r#"{"state":"OPEN","context":"100"}"#);
/// assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// String form of the current state
    pub state: String,

    /// Context as produced by the codec
    pub context: String,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact binary form of the snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Converts a context to and from its snapshot string.
pub trait ContextCodec<C>: Send + Sync {
    fn encode(&self, context: &C) -> Result<String, CodecError>;

    fn decode(&self, raw: &str) -> Result<C, CodecError>;
}

/// Context codec for any serde-serializable context, using JSON.
pub struct JsonCodec<C> {
    _phantom: PhantomData<fn() -> C>,
}

impl<C> JsonCodec<C> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<C> Default for JsonCodec<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for JsonCodec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsonCodec")
    }
}

impl<C> ContextCodec<C> for JsonCodec<C>
where
    C: Serialize + DeserializeOwned,
{
    fn encode(&self, context: &C) -> Result<String, CodecError> {
        Ok(serde_json::to_string(context)?)
    }

    fn decode(&self, raw: &str) -> Result<C, CodecError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Door {
        degree_of_opening: u32,
    }

    #[test]
    fn snapshot_json_shape() {
        let snapshot = Snapshot {
            state: "AJAR".to_string(),
            context: "{\"degree_of_opening\":99}".to_string(),
        };

        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(value["state"], "AJAR");
        assert_eq!(value["context"], "{\"degree_of_opening\":99}");
    }

    #[test]
    fn snapshot_binary_form_restores() {
        let snapshot = Snapshot {
            state: "CLOSED".to_string(),
            context: "0".to_string(),
        };

        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(Snapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn malformed_snapshot_is_rejected() {
        let result = Snapshot::from_json("{\"state\":\"OPEN\"}");
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn json_codec_encodes_context() {
        let codec = JsonCodec::<Door>::new();
        let door = Door {
            degree_of_opening: 42,
        };

        let raw = codec.encode(&door).unwrap();
        assert_eq!(raw, "{\"degree_of_opening\":42}");
        assert_eq!(codec.decode(&raw).unwrap(), door);
    }

    #[test]
    fn json_codec_reports_bad_payload() {
        let codec = JsonCodec::<Door>::new();
        assert!(matches!(
            codec.decode("not json"),
            Err(CodecError::Json(_))
        ));
    }
}
