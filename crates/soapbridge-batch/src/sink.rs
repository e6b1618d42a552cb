//! Output sink implementations.

use async_trait::async_trait;
use soapbridge_core::OutputSink;
use std::sync::{Arc, Mutex};

/// In-memory sink collecting delivered outputs in order.
///
/// Used by the CLI (outputs are printed after the batch) and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    outputs: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far, in delivery order.
    pub fn outputs(&self) -> Vec<String> {
        self.outputs.lock().unwrap().clone()
    }

    /// Remove and return everything delivered so far.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.outputs.lock().unwrap())
    }
}

#[async_trait]
impl OutputSink for MemorySink {
    async fn deliver(&self, output: String) {
        self.outputs.lock().unwrap().push(output);
    }
}
