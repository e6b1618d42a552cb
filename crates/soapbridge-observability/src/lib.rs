//! # soapbridge-observability
//!
//! Structured logging for SoapBridge.
//!
//! JSON-structured logs compatible with ELK, Loki, CloudWatch, or
//! human-readable text for local runs. `RUST_LOG` overrides the configured
//! level when set.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig};
