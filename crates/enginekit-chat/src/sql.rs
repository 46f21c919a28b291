//! SQL tool over an ephemeral SQLite database.
//!
//! Each call opens its own connection, runs exactly one statement inside a
//! transaction and commits. Failures roll back and come back as data in
//! [`SqlRunResult::error`] so a conversational caller can recover.

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{error, info, info_span};

use enginekit_core::{Error, Result};

/// Outcome of a single `run_sql` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlRunResult {
    /// Set when the statement failed. `None` on success.
    #[serde(default)]
    pub error: Option<String>,
    /// Rows returned by a SELECT-like statement, every column stringified.
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl SqlRunResult {
    fn ok(rows: Vec<Vec<String>>) -> Self {
        Self { error: None, rows }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            rows: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Human-readable summary: the error, a row count, or the rows themselves.
    pub fn summary(&self) -> String {
        if let Some(err) = &self.error {
            return format!("Error: {}", err);
        }
        if self.rows.is_empty() {
            return "OK (no rows)".to_string();
        }
        self.rows
            .iter()
            .map(|row| row.join(" | "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs SQL statements against one database file.
pub struct SqlRunner {
    db_path: PathBuf,
    // Held so the file lives as long as the runner.
    _temp: Option<NamedTempFile>,
}

impl SqlRunner {
    /// Create a runner over a fresh temp `.db` file, removed on drop.
    pub fn ephemeral() -> Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix("enginekit-")
            .suffix(".db")
            .tempfile()?;
        let db_path = temp.path().to_path_buf();
        info!("Ephemeral SQLite database at {}", db_path.display());
        Ok(Self {
            db_path,
            _temp: Some(temp),
        })
    }

    /// Use an existing (or to-be-created) database file.
    pub fn open(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            _temp: None,
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path).map_err(|e| Error::Database(e.to_string()))
    }

    /// Run one statement (DDL or DML). Returns rows for row-producing statements.
    pub fn run_sql(&self, sql_query: &str) -> SqlRunResult {
        let span = info_span!("run_sql", db = %self.db_path.display());
        let _enter = span.enter();

        let mut conn = match self.connect() {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to open database: {}", e);
                return SqlRunResult::failed(e.to_string());
            }
        };
        let tx = match conn.transaction() {
            Ok(tx) => tx,
            Err(e) => {
                error!("Failed to begin transaction: {}", e);
                return SqlRunResult::failed(e.to_string());
            }
        };

        match execute(&tx, sql_query) {
            Ok(rows) => match tx.commit() {
                Ok(()) => SqlRunResult::ok(rows),
                Err(e) => {
                    error!("Commit failed: {} for query: {}", e, sql_query);
                    SqlRunResult::failed(e.to_string())
                }
            },
            Err(err) => {
                error!("SQL Error: {} for query: {}", err, sql_query);
                match tx.rollback() {
                    Ok(()) => info!("SQL transaction rolled back due to error."),
                    Err(rb_err) => error!("Failed to rollback transaction: {}", rb_err),
                }
                SqlRunResult::failed(err.to_string())
            }
        }
    }
}

fn execute(conn: &Connection, sql_query: &str) -> rusqlite::Result<Vec<Vec<String>>> {
    let mut stmt = conn.prepare(sql_query)?;
    let columns = stmt.column_count();

    if columns == 0 {
        let affected = stmt.execute([])?;
        info!("Query affected {} rows (DDL/DML)", affected);
        return Ok(Vec::new());
    }

    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns);
        for i in 0..columns {
            values.push(value_to_string(row.get_ref(i)?));
        }
        out.push(values);
    }
    info!("Query returned {} rows", out.len());
    Ok(out)
}

fn value_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => format!("{:?}", f),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
