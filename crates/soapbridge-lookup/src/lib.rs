//! # soapbridge-lookup
//!
//! SQLite-backed implementation of the [`ReferenceLookup`] port.
//!
//! Every lookup opens its own scoped connection, runs a single parameterized
//! point-select, and releases the connection on every exit path. Multiple
//! matching rows fold to the last row read (last-write-wins).
//!
//! [`ReferenceLookup`]: soapbridge_core::ReferenceLookup

pub mod store;

pub use store::SqliteRefStore;
