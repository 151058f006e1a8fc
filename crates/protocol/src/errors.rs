//! Protocol errors module

use thiserror::Error;

/// Protocol-level errors
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("malformed request: {reason}")]
    MalformedRequest { reason: String },

    #[error("Serialization error: {source}")]
    SerializationError { source: serde_json::Error },
}

impl ProtocolError {
    /// Shorthand for building a [`ProtocolError::MalformedRequest`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        ProtocolError::MalformedRequest {
            reason: reason.into(),
        }
    }

    /// Whether the caller, rather than the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProtocolError::MalformedRequest { .. })
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::SerializationError { source: err }
    }
}
