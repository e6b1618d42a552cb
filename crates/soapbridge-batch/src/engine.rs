//! `BridgeEngine` — drives one batch through the pipeline with failure
//! isolation and resolves the invocation's aggregate outcome.

use crate::transcode::transcode;
use soapbridge_core::{
    error::{BatchError, ItemError},
    EmitPolicy, EnvelopeTransport, OutputSink, Product, RawMessage, ReferenceLookup,
};
use soapbridge_envelope::{build_request, parse_response};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Detailed result of one batch run: every per-item outcome, in batch order.
///
/// Nothing is dropped here; even under the last-success emit policy the
/// earlier successes remain inspectable.
#[derive(Debug)]
pub struct BatchResult {
    /// (original index, transcoded output) pairs for successful items.
    pub outputs: Vec<(usize, String)>,
    /// (original index, captured error) pairs for failed items.
    pub failures: Vec<(usize, ItemError)>,
    /// Total items in the batch.
    pub total_input: usize,
}

/// The batch coordinator.
///
/// Items are processed strictly in arrival order, one at a time. Each item
/// transitions decode → lookup → envelope build → exchange → parse →
/// transcode, or jumps to a captured failure at any step. The failure list
/// is owned solely by the engine and never exposed to the per-item steps.
pub struct BridgeEngine {
    lookup: Arc<dyn ReferenceLookup>,
    transport: Arc<dyn EnvelopeTransport>,
    sink: Arc<dyn OutputSink>,
    emit: EmitPolicy,
}

impl BridgeEngine {
    pub fn new(
        lookup: Arc<dyn ReferenceLookup>,
        transport: Arc<dyn EnvelopeTransport>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            lookup,
            transport,
            sink,
            emit: EmitPolicy::default(),
        }
    }

    pub fn with_emit(mut self, emit: EmitPolicy) -> Self {
        self.emit = emit;
        self
    }

    /// Run the batch and collect every per-item outcome. Never fails as a
    /// whole; failures are captured per item.
    pub async fn run(&self, batch: &[RawMessage]) -> BatchResult {
        let total_input = batch.len();
        info!(
            "BridgeEngine: processing batch of {} messages (emit={:?})",
            total_input, self.emit
        );

        let mut outputs: Vec<(usize, String)> = Vec::with_capacity(total_input);
        let mut failures: Vec<(usize, ItemError)> = Vec::new();

        for (idx, raw) in batch.iter().enumerate() {
            match self.process_item(raw).await {
                Ok(output) => outputs.push((idx, output)),
                Err(err) => {
                    // Keep processing the rest of the batch; capture and continue.
                    warn!("BridgeEngine: item {idx} failed: {err}");
                    failures.push((idx, err));
                }
            }
        }

        info!(
            "BridgeEngine: batch complete, {} succeeded, {} failed",
            outputs.len(),
            failures.len()
        );

        BatchResult {
            outputs,
            failures,
            total_input,
        }
    }

    /// Run the batch, deliver downstream, and resolve the invocation result.
    ///
    /// Any captured failure removes the downstream emission: the error, not
    /// the output, is authoritative. Returns `Ok(None)` for an empty batch.
    pub async fn process(&self, batch: &[RawMessage]) -> Result<Option<String>, BatchError> {
        let result = self.run(batch).await;

        if !result.failures.is_empty() {
            let total = result.total_input;
            let mut failures = result.failures;
            if failures.len() == 1 {
                let (_, err) = failures.remove(0);
                return Err(BatchError::Item(err));
            }
            return Err(BatchError::Aggregate { total, failures });
        }

        let last = result.outputs.last().map(|(_, output)| output.clone());
        match self.emit {
            EmitPolicy::FanOut => {
                for (_, output) in &result.outputs {
                    self.sink.deliver(output.clone()).await;
                }
            }
            EmitPolicy::LastSuccess => {
                if let Some(output) = &last {
                    self.sink.deliver(output.clone()).await;
                }
            }
        }
        Ok(last)
    }

    async fn process_item(&self, raw: &RawMessage) -> Result<String, ItemError> {
        let text = raw.text()?;
        debug!("BridgeEngine: picked a message: {text}");

        // Validation probe against the reference store. The looked-up value
        // carries no data dependency into the envelope; a store failure
        // still fails the item.
        match self.lookup.lookup_name(text)? {
            Some(name) => debug!("BridgeEngine: reference store maps '{text}' to '{name}'"),
            None => debug!("BridgeEngine: reference store has no row for '{text}'"),
        }

        let request = build_request(text)?;
        let response = self.transport.exchange(&request).await?;
        let envelope = parse_response::<Product>(&response)?;

        Ok(transcode(&envelope.body.payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use crate::transport::LoopbackTransport;
    use async_trait::async_trait;
    use soapbridge_core::error::{DecodeError, LookupError, TransportError};

    /// Lookup double: knows nothing, never fails.
    struct EmptyLookup;

    impl ReferenceLookup for EmptyLookup {
        fn lookup_name(&self, _id: &str) -> Result<Option<String>, LookupError> {
            Ok(None)
        }
    }

    /// Lookup double: store unreachable.
    struct UnreachableLookup;

    impl ReferenceLookup for UnreachableLookup {
        fn lookup_name(&self, _id: &str) -> Result<Option<String>, LookupError> {
            Err(LookupError::ConnectionFailed {
                path: "ref.db".into(),
                reason: "unable to open database file".into(),
            })
        }
    }

    /// Transport double: a faulty endpoint returning broken markup.
    struct FaultyTransport;

    #[async_trait]
    impl EnvelopeTransport for FaultyTransport {
        async fn exchange(&self, _request: &str) -> Result<String, TransportError> {
            Ok("<bad".to_owned())
        }
    }

    fn engine_with(sink: &MemorySink) -> BridgeEngine {
        BridgeEngine::new(
            Arc::new(EmptyLookup),
            Arc::new(LoopbackTransport),
            Arc::new(sink.clone()),
        )
    }

    fn json(id: &str) -> String {
        format!(r#"{{"Id":"{id}","Name":"some product"}}"#)
    }

    #[tokio::test]
    async fn clean_batch_resolves_to_last_output() {
        let sink = MemorySink::new();
        let engine = engine_with(&sink);
        let batch = vec![RawMessage::from("1"), RawMessage::from("2")];

        let resolved = engine.process(&batch).await.unwrap();
        assert_eq!(resolved, Some(json("2")));
        // Only the final item's output reaches the sink under LastSuccess.
        assert_eq!(sink.outputs(), vec![json("2")]);
    }

    #[tokio::test]
    async fn clean_batch_keeps_all_successes_in_result() {
        let sink = MemorySink::new();
        let engine = engine_with(&sink);
        let batch = vec![RawMessage::from("1"), RawMessage::from("2")];

        let result = engine.run(&batch).await;
        assert_eq!(result.total_input, 2);
        assert_eq!(result.outputs, vec![(0, json("1")), (1, json("2"))]);
        assert!(result.failures.is_empty());
    }

    #[tokio::test]
    async fn empty_batch_is_none_not_an_error() {
        let sink = MemorySink::new();
        let engine = engine_with(&sink);

        let resolved = engine.process(&[]).await.unwrap();
        assert_eq!(resolved, None);
        assert!(sink.outputs().is_empty());
    }

    #[tokio::test]
    async fn single_failure_propagates_unwrapped() {
        let sink = MemorySink::new();
        let engine = engine_with(&sink);
        let batch = vec![RawMessage::from("42"), RawMessage::new(vec![0xff, 0xfe])];

        let err = engine.process(&batch).await.unwrap_err();
        assert!(matches!(
            err,
            BatchError::Item(ItemError::Decode(DecodeError::InvalidUtf8 { .. }))
        ));
        // Item 1's success was computed but the failure is authoritative.
        assert!(sink.outputs().is_empty());
    }

    #[tokio::test]
    async fn sibling_success_is_computed_despite_failure() {
        let sink = MemorySink::new();
        let engine = engine_with(&sink);
        let batch = vec![RawMessage::from("42"), RawMessage::new(vec![0xff, 0xfe])];

        let result = engine.run(&batch).await;
        assert_eq!(result.outputs, vec![(0, json("42"))]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].0, 1);
    }

    #[tokio::test]
    async fn multiple_failures_aggregate_in_order() {
        let sink = MemorySink::new();
        let engine = engine_with(&sink);
        let batch = vec![
            RawMessage::new(vec![0xff]),
            RawMessage::from("ok"),
            RawMessage::new(vec![0xfe]),
        ];

        let err = engine.process(&batch).await.unwrap_err();
        match err {
            BatchError::Aggregate { total, failures } => {
                assert_eq!(total, 3);
                let indices: Vec<usize> = failures.iter().map(|(i, _)| *i).collect();
                assert_eq!(indices, vec![0, 2]);
                for (_, f) in &failures {
                    assert!(matches!(
                        f,
                        ItemError::Decode(DecodeError::InvalidUtf8 { .. })
                    ));
                }
            }
            other => panic!("expected aggregate, got: {other}"),
        }
        assert!(sink.outputs().is_empty());
    }

    #[tokio::test]
    async fn unreachable_store_fails_every_item() {
        let sink = MemorySink::new();
        let engine = BridgeEngine::new(
            Arc::new(UnreachableLookup),
            Arc::new(LoopbackTransport),
            Arc::new(sink.clone()),
        );
        let batch = vec![
            RawMessage::from("1"),
            RawMessage::from("2"),
            RawMessage::from("3"),
        ];

        let err = engine.process(&batch).await.unwrap_err();
        match err {
            BatchError::Aggregate { total, failures } => {
                assert_eq!(total, 3);
                assert_eq!(failures.len(), 3);
                for (_, f) in &failures {
                    assert!(matches!(f, ItemError::Lookup(_)));
                }
            }
            other => panic!("expected aggregate, got: {other}"),
        }
    }

    #[tokio::test]
    async fn faulty_endpoint_markup_is_a_decode_failure() {
        let sink = MemorySink::new();
        let engine = BridgeEngine::new(
            Arc::new(EmptyLookup),
            Arc::new(FaultyTransport),
            Arc::new(sink.clone()),
        );
        let batch = vec![RawMessage::from("42")];

        let err = engine.process(&batch).await.unwrap_err();
        assert!(matches!(
            err,
            BatchError::Item(ItemError::Decode(DecodeError::MalformedMarkup { .. }))
        ));
    }

    #[tokio::test]
    async fn fan_out_emits_each_success_in_order() {
        let sink = MemorySink::new();
        let engine = engine_with(&sink).with_emit(EmitPolicy::FanOut);
        let batch = vec![
            RawMessage::from("a"),
            RawMessage::from("b"),
            RawMessage::from("c"),
        ];

        let resolved = engine.process(&batch).await.unwrap();
        assert_eq!(resolved, Some(json("c")));
        assert_eq!(sink.outputs(), vec![json("a"), json("b"), json("c")]);
    }

    #[tokio::test]
    async fn repeated_invocation_is_idempotent() {
        let sink = MemorySink::new();
        let engine = engine_with(&sink);
        let batch = vec![RawMessage::from("7"), RawMessage::from("8")];

        let first = engine.process(&batch).await.unwrap();
        sink.drain();
        let second = engine.process(&batch).await.unwrap();
        assert_eq!(first, second);
    }
}
