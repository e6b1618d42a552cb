//! End-to-end pipeline tests against a real SQLite reference store.
//!
//! Each test seeds an on-disk store, runs a batch through the full
//! decode → lookup → envelope → transcode pipeline with the loopback
//! exchange, and asserts on the resolved invocation outcome.

use soapbridge_batch::{BridgeEngine, LoopbackTransport, MemorySink};
use soapbridge_core::{
    error::{BatchError, ItemError, LookupError},
    EmitPolicy, RawMessage,
};
use soapbridge_lookup::SqliteRefStore;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

static COUNTER: AtomicU32 = AtomicU32::new(0);

fn temp_store() -> SqliteRefStore {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "soapbridge-pipeline-test-{}-{n}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let store = SqliteRefStore::new(path);
    store.init().unwrap();
    store
}

fn engine(store: SqliteRefStore, sink: &MemorySink) -> BridgeEngine {
    BridgeEngine::new(
        Arc::new(store),
        Arc::new(LoopbackTransport),
        Arc::new(sink.clone()),
    )
}

#[tokio::test]
async fn unrelated_reference_row_still_succeeds() {
    // Store holds {id: 1, name: widget}; the message id is 42. The lookup is
    // a validation probe, so the envelope keeps the fixed product name.
    let store = temp_store();
    store.seed("1", "widget").unwrap();

    let sink = MemorySink::new();
    let engine = engine(store, &sink);

    let resolved = engine.process(&[RawMessage::from("42")]).await.unwrap();
    assert_eq!(
        resolved.as_deref(),
        Some(r#"{"Id":"42","Name":"some product"}"#)
    );
    assert_eq!(sink.outputs().len(), 1);
}

#[tokio::test]
async fn matching_reference_row_does_not_leak_into_output() {
    let store = temp_store();
    store.seed("42", "widget").unwrap();

    let sink = MemorySink::new();
    let engine = engine(store, &sink);

    let resolved = engine.process(&[RawMessage::from("42")]).await.unwrap();
    assert_eq!(
        resolved.as_deref(),
        Some(r#"{"Id":"42","Name":"some product"}"#)
    );
}

#[tokio::test]
async fn unreachable_store_aggregates_one_lookup_error_per_item() {
    let store = SqliteRefStore::new("/nonexistent-soapbridge-dir/ref.db");
    let sink = MemorySink::new();
    let engine = engine(store, &sink);

    let batch = vec![RawMessage::from("1"), RawMessage::from("2")];
    let err = engine.process(&batch).await.unwrap_err();
    match err {
        BatchError::Aggregate { total, failures } => {
            assert_eq!(total, 2);
            assert_eq!(failures.len(), 2);
            for (_, f) in &failures {
                assert!(matches!(
                    f,
                    ItemError::Lookup(LookupError::ConnectionFailed { .. })
                ));
            }
        }
        other => panic!("expected aggregate, got: {other}"),
    }
    assert!(sink.outputs().is_empty());
}

#[tokio::test]
async fn fan_out_delivers_every_item_against_real_store() {
    let store = temp_store();
    store.seed("1", "widget").unwrap();

    let sink = MemorySink::new();
    let engine = engine(store, &sink).with_emit(EmitPolicy::FanOut);

    let batch = vec![RawMessage::from("1"), RawMessage::from("2")];
    engine.process(&batch).await.unwrap();
    assert_eq!(
        sink.outputs(),
        vec![
            r#"{"Id":"1","Name":"some product"}"#.to_owned(),
            r#"{"Id":"2","Name":"some product"}"#.to_owned(),
        ]
    );
}

#[tokio::test]
async fn stable_store_yields_identical_outcomes_across_invocations() {
    let store = temp_store();
    store.seed("1", "widget").unwrap();

    let sink = MemorySink::new();
    let engine = engine(store, &sink);

    let batch = vec![RawMessage::from("1"), RawMessage::from("2")];
    let first = engine.process(&batch).await.unwrap();
    let second = engine.process(&batch).await.unwrap();
    assert_eq!(first, second);
}
