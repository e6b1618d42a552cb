//! Ports — abstractions over the pipeline's external collaborators.
//!
//! The batch coordinator holds these as trait objects so the production
//! implementations (SQLite store, loopback or HTTP exchange, real sink) and
//! test doubles are interchangeable.

use crate::error::{LookupError, TransportError};
use async_trait::async_trait;

/// Keyed point lookup against the reference store.
pub trait ReferenceLookup: Send + Sync {
    /// Look up the name column for `id`.
    ///
    /// Returns `None` when no row matches. Multiple matching rows are not an
    /// error; they fold to the last row read (last-write-wins). Each call
    /// opens and releases its own scoped connection.
    fn lookup_name(&self, id: &str) -> Result<Option<String>, LookupError>;
}

/// Request/response exchange with the legacy envelope endpoint.
#[async_trait]
pub trait EnvelopeTransport: Send + Sync {
    /// Send the request envelope markup, return the response markup.
    async fn exchange(&self, request: &str) -> Result<String, TransportError>;
}

/// Downstream delivery of transcoded outputs.
///
/// The platform transport behind this port accepts the emission; a batch
/// with any captured failure never reaches it.
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn deliver(&self, output: String);
}
