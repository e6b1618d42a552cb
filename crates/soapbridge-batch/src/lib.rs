//! # soapbridge-batch
//!
//! Batch coordinator for the SoapBridge pipeline.
//!
//! Drives one batch of messages through decode → reference lookup →
//! envelope build/exchange/parse → JSON transcode, one item at a time, in
//! arrival order. Item failures are captured and never abort the loop; at
//! batch close the captured failures decide the invocation outcome:
//!
//! - zero failures: deliver per the configured [`EmitPolicy`] and return the
//!   resolved value (`None` for an empty batch),
//! - exactly one failure: propagate that item's error unwrapped,
//! - two or more: propagate an aggregate preserving all of them in order.
//!
//! [`EmitPolicy`]: soapbridge_core::EmitPolicy

pub mod engine;
pub mod sink;
pub mod transcode;
pub mod transport;

pub use engine::{BatchResult, BridgeEngine};
pub use sink::MemorySink;
pub use transcode::transcode;
pub use transport::LoopbackTransport;

#[cfg(feature = "remote")]
pub use transport::HttpTransport;
