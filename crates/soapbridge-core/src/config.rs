//! Bridge configuration.
//!
//! Passed explicitly to the coordinator at construction time; the
//! bootstrapping layer (CLI) sources it once at process start.

use serde::{Deserialize, Serialize};

/// Output multiplicity of one batch invocation.
///
/// A batch consumes N items but the invocation has a single result slot, so
/// the contract between "items consumed" and "outputs produced" is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmitPolicy {
    /// Deliver only the last successful item's output downstream. Earlier
    /// successes stay visible in the batch result but are not emitted.
    #[default]
    LastSuccess,
    /// Deliver one output per successful item, in batch order.
    FanOut,
}

impl std::str::FromStr for EmitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-success" | "last" => Ok(EmitPolicy::LastSuccess),
            "fan-out" | "fanout" => Ok(EmitPolicy::FanOut),
            other => Err(format!("unknown emit policy '{other}'")),
        }
    }
}

/// Top-level bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Path / connection string for the reference store.
    pub store: String,
    /// Legacy endpoint URL. `None` selects the loopback exchange, where the
    /// locally-built request document doubles as the response.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub emit: EmitPolicy,
}

impl BridgeConfig {
    /// A config for a purely local bridge: on-disk store, loopback exchange.
    pub fn local(store: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            endpoint: None,
            emit: EmitPolicy::default(),
        }
    }
}
