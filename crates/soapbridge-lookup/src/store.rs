//! SQLite reference store.
//!
//! ## Schema
//! ```sql
//! CREATE TABLE ref_products (
//!     id   TEXT NOT NULL,
//!     name TEXT NOT NULL
//! );
//! ```
//! The table carries no uniqueness constraint: duplicate ids are legal and
//! the lookup folds them to the most recently inserted row.

use rusqlite::{params, Connection};
use soapbridge_core::{error::LookupError, ReferenceLookup};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reference store addressed by a SQLite database path.
///
/// Holds only the path; each operation opens and drops its own connection,
/// so there is no pooling and no cross-item connection leakage.
#[derive(Debug, Clone)]
pub struct SqliteRefStore {
    path: PathBuf,
}

impl SqliteRefStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the reference table if it does not exist yet.
    pub fn init(&self) -> Result<(), LookupError> {
        let conn = self.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS ref_products (
                id   TEXT NOT NULL,
                name TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS ref_products_id ON ref_products (id);",
        )
        .map_err(query_failed)?;
        Ok(())
    }

    /// Append one reference row. Duplicate ids are allowed; later rows win
    /// on lookup.
    pub fn seed(&self, id: &str, name: &str) -> Result<(), LookupError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO ref_products (id, name) VALUES (?1, ?2)",
            params![id, name],
        )
        .map_err(query_failed)?;
        Ok(())
    }

    fn connect(&self) -> Result<Connection, LookupError> {
        Connection::open(&self.path).map_err(|e| LookupError::ConnectionFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl ReferenceLookup for SqliteRefStore {
    fn lookup_name(&self, id: &str) -> Result<Option<String>, LookupError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare("SELECT name FROM ref_products WHERE id = ?1")
            .map_err(query_failed)?;
        let mut rows = stmt.query(params![id]).map_err(query_failed)?;

        // Sequential row iteration; the last matching row wins.
        let mut value = None;
        while let Some(row) = rows.next().map_err(query_failed)? {
            value = Some(row.get::<_, String>(0).map_err(query_failed)?);
        }
        debug!("SqliteRefStore: lookup id='{id}' matched={}", value.is_some());
        Ok(value)
    }
}

fn query_failed(e: rusqlite::Error) -> LookupError {
    LookupError::QueryFailed {
        reason: e.to_string(),
    }
}
