//! Sink adapter types

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

use crate::record::Row;

// ============================================================
// Error Types
// ============================================================

/// Sink error types
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store file has unsupported version {found} (expected {expected}): {path}")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, SinkError>;

// ============================================================
// Sink Trait
// ============================================================

/// Tabular store receiving finished rows.
///
/// Every call either fully applies or leaves the store untouched; in
/// particular `append_rows` never writes part of a batch. Calls are not
/// retried here.
pub trait RowSink {
    /// Append a single row
    fn append_row(&mut self, row: Row) -> Result<()>;

    /// Append a batch of rows
    fn append_rows(&mut self, rows: Vec<Row>) -> Result<()>;

    /// All rows in insertion order
    fn read_all_rows(&self) -> Result<Vec<Row>>;

    /// Remove every row
    fn clear(&mut self) -> Result<()>;

    /// Replace the whole table with `rows` in one step
    fn replace_all(&mut self, rows: Vec<Row>) -> Result<()>;

    /// Time of the last successful write, if known
    fn last_update(&self) -> Option<DateTime<Utc>> {
        None
    }
}

impl<S: RowSink + ?Sized> RowSink for Box<S> {
    fn append_row(&mut self, row: Row) -> Result<()> {
        (**self).append_row(row)
    }

    fn append_rows(&mut self, rows: Vec<Row>) -> Result<()> {
        (**self).append_rows(rows)
    }

    fn read_all_rows(&self) -> Result<Vec<Row>> {
        (**self).read_all_rows()
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn replace_all(&mut self, rows: Vec<Row>) -> Result<()> {
        (**self).replace_all(rows)
    }

    fn last_update(&self) -> Option<DateTime<Utc>> {
        (**self).last_update()
    }
}

// ============================================================
// Statistics
// ============================================================

/// Summary of a store's contents
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SheetStats {
    /// Data rows (header excluded when present)
    pub total_matches: usize,
    /// Width of the first row
    pub columns: usize,
    /// Last successful write
    pub last_update: Option<DateTime<Utc>>,
}

/// Collect statistics from a sink
pub fn sheet_stats<S: RowSink + ?Sized>(sink: &S, has_header: bool) -> Result<SheetStats> {
    let rows = sink.read_all_rows()?;
    let header_rows = usize::from(has_header && !rows.is_empty());
    Ok(SheetStats {
        total_matches: rows.len() - header_rows,
        columns: rows.first().map(Vec::len).unwrap_or(0),
        last_update: sink.last_update(),
    })
}
