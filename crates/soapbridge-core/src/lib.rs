//! # soapbridge-core
//!
//! Core types, error taxonomy, and ports shared across all SoapBridge crates.
//! The envelope codec, reference lookup client, and batch coordinator are
//! built on top of the interfaces defined here.

pub mod config;
pub mod error;
pub mod message;
pub mod ports;
pub mod product;

pub use config::{BridgeConfig, EmitPolicy};
pub use error::{BatchError, DecodeError, ItemError, LookupError, TranscodeError, TransportError};
pub use message::RawMessage;
pub use ports::{EnvelopeTransport, OutputSink, ReferenceLookup};
pub use product::Product;
