//! Error types for the SoapBridge pipeline.
//!
//! Every per-item error kind (`DecodeError`, `LookupError`, `TransportError`,
//! `TranscodeError`) is caught at the item boundary by the batch coordinator
//! and never aborts the batch loop. At the batch boundary the captured
//! failures surface as a single `BatchError`.

use thiserror::Error;

/// Errors decoding one item: bad payload bytes or malformed / schema-mismatched
/// envelope markup.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("message body is not valid UTF-8: {reason}")]
    InvalidUtf8 { reason: String },

    #[error("malformed envelope markup: {reason}")]
    MalformedMarkup { reason: String },

    #[error("unexpected namespace on <{element}>: expected {expected}")]
    WrongNamespace { element: String, expected: String },

    #[error("missing element <{element}> in envelope")]
    MissingElement { element: String },

    #[error("failed to write envelope markup: {reason}")]
    WriteFailed { reason: String },
}

/// Errors from the reference lookup client.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to open reference store at {path}: {reason}")]
    ConnectionFailed { path: String, reason: String },

    #[error("reference lookup query failed: {reason}")]
    QueryFailed { reason: String },
}

/// Errors from the legacy endpoint exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("endpoint request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("endpoint returned status {status}")]
    BadStatus { status: u16 },
}

/// Errors serializing the extracted payload to the outbound interchange format.
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The union of everything that can go wrong while processing one item.
///
/// Variants are transparent so the coordinator can propagate a lone item
/// failure as-is, without an extra wrapping layer.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Transcode(#[from] TranscodeError),
}

/// Terminal error of one batch invocation.
///
/// Exactly one captured failure propagates unwrapped; two or more fold into
/// `Aggregate`, preserving batch order and the original item indices.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Item(ItemError),

    #[error("{} of {total} batch items failed", .failures.len())]
    Aggregate {
        total: usize,
        /// (original item index, captured error) pairs, in batch order.
        failures: Vec<(usize, ItemError)>,
    },
}
