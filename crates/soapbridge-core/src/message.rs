//! Inbound message types.

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};

/// A raw, unprocessed message as delivered by the stream transport.
/// This is the input to every batch invocation; one batch is an ordered
/// slice of these. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Opaque payload bytes, assumed UTF-8 text.
    pub body: Vec<u8>,
}

impl RawMessage {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }

    /// Decode the payload bytes as UTF-8 text.
    pub fn text(&self) -> Result<&str, DecodeError> {
        std::str::from_utf8(&self.body).map_err(|e| DecodeError::InvalidUtf8 {
            reason: e.to_string(),
        })
    }
}

impl From<&str> for RawMessage {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}
