//! SoapBridge CLI — run batches through the bridge pipeline.
//!
//! # Commands
//! ```
//! soapbridge run        --input <path|-> [--store <db>] [--emit last-success|fan-out]
//! soapbridge init-store [--store <db>] [--row id=name ...]
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use soapbridge_batch::{BridgeEngine, LoopbackTransport, MemorySink};
use soapbridge_core::{BridgeConfig, EmitPolicy, EnvelopeTransport, RawMessage};
use soapbridge_lookup::SqliteRefStore;
use soapbridge_observability::{init_tracing, LogConfig};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

#[derive(Parser)]
#[command(
    name = "soapbridge",
    about = "Batch event processor bridging a message stream to a legacy SOAP endpoint",
    version
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one batch of messages through the bridge pipeline
    Run {
        /// Input file with one message per line ("-" reads stdin)
        #[arg(short, long)]
        input: String,
        /// Path to the SQLite reference store
        #[arg(long, default_value = "./refstore.db")]
        store: String,
        /// Legacy endpoint URL (requires the `remote` build feature);
        /// omitted = loopback exchange
        #[arg(long)]
        endpoint: Option<String>,
        /// Emit policy: "last-success" or "fan-out"
        #[arg(long, default_value = "last-success")]
        emit: String,
        /// Load config from a JSON file instead of the flags above
        #[arg(long)]
        config: Option<PathBuf>,
        /// Emit JSON structured logs
        #[arg(long)]
        json_logs: bool,
    },

    /// Create and seed a reference store for local development
    #[command(name = "init-store")]
    InitStore {
        /// Path to the SQLite reference store
        #[arg(long, default_value = "./refstore.db")]
        store: String,
        /// Rows to seed, formatted as id=name (default: 1=widget)
        #[arg(long)]
        row: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            store,
            endpoint,
            emit,
            config,
            json_logs,
        } => {
            let level = if cli.verbose { "debug" } else { "info" };
            init_tracing(&LogConfig {
                level: level.into(),
                json: json_logs,
            });

            let config = match config {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading config {}", path.display()))?;
                    serde_json::from_str::<BridgeConfig>(&raw)
                        .with_context(|| format!("parsing config {}", path.display()))?
                }
                None => BridgeConfig {
                    store,
                    endpoint,
                    emit: emit
                        .parse::<EmitPolicy>()
                        .map_err(|e| anyhow!("--emit: {e}"))?,
                },
            };

            run_batch(&config, &input).await
        }

        Commands::InitStore { store, row } => {
            let store = SqliteRefStore::new(store);
            store.init().context("initialising reference store")?;

            let rows = if row.is_empty() {
                vec!["1=widget".to_owned()]
            } else {
                row
            };
            for entry in &rows {
                let (id, name) = entry
                    .split_once('=')
                    .ok_or_else(|| anyhow!("bad --row '{entry}', expected id=name"))?;
                store.seed(id, name).context("seeding reference store")?;
            }
            println!(
                "seeded {} row(s) into {}",
                rows.len(),
                store.path().display()
            );
            Ok(())
        }
    }
}

async fn run_batch(config: &BridgeConfig, input: &str) -> Result<()> {
    let batch = read_batch(input)?;
    let sink = MemorySink::new();

    let engine = BridgeEngine::new(
        Arc::new(SqliteRefStore::new(config.store.clone())),
        build_transport(config.endpoint.as_deref())?,
        Arc::new(sink.clone()),
    )
    .with_emit(config.emit);

    match engine.process(&batch).await {
        Ok(resolved) => {
            for output in sink.drain() {
                println!("{output}");
            }
            if resolved.is_none() {
                println!("none");
            }
            Ok(())
        }
        Err(err) => {
            if let soapbridge_core::BatchError::Aggregate { failures, .. } = &err {
                for (idx, cause) in failures {
                    error!("item {idx}: {cause}");
                }
            }
            Err(err).context("batch invocation failed")
        }
    }
}

fn read_batch(input: &str) -> Result<Vec<RawMessage>> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading input {input}"))?
    };

    Ok(text
        .lines()
        .filter(|line| !line.is_empty())
        .map(RawMessage::from)
        .collect())
}

fn build_transport(endpoint: Option<&str>) -> Result<Arc<dyn EnvelopeTransport>> {
    match endpoint {
        None => Ok(Arc::new(LoopbackTransport)),
        #[cfg(feature = "remote")]
        Some(url) => Ok(Arc::new(soapbridge_batch::HttpTransport::new(url)?)),
        #[cfg(not(feature = "remote"))]
        Some(url) => Err(anyhow!(
            "endpoint '{url}' configured, but this binary was built without the `remote` feature"
        )),
    }
}
