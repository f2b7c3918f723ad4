//! In-memory sink for dry runs and tests

use chrono::{DateTime, Utc};

use super::types::{Result, RowSink, SinkError};
use crate::record::Row;

/// Rows held in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    rows: Vec<Row>,
    last_update: Option<DateTime<Utc>>,
    unavailable: Option<String>,
}

impl MemorySink {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink pre-filled with `rows`
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Make every call fail with `reason` until cleared with `None`
    pub fn set_unavailable(&mut self, reason: Option<&str>) {
        self.unavailable = reason.map(str::to_string);
    }

    /// Stored rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows are stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_available(&self) -> Result<()> {
        match &self.unavailable {
            Some(reason) => Err(SinkError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn touch(&mut self) {
        self.last_update = Some(Utc::now());
    }
}

impl RowSink for MemorySink {
    fn append_row(&mut self, row: Row) -> Result<()> {
        self.check_available()?;
        self.rows.push(row);
        self.touch();
        Ok(())
    }

    fn append_rows(&mut self, rows: Vec<Row>) -> Result<()> {
        self.check_available()?;
        if rows.is_empty() {
            return Ok(());
        }
        self.rows.extend(rows);
        self.touch();
        Ok(())
    }

    fn read_all_rows(&self) -> Result<Vec<Row>> {
        self.check_available()?;
        Ok(self.rows.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.check_available()?;
        self.rows.clear();
        self.touch();
        Ok(())
    }

    fn replace_all(&mut self, rows: Vec<Row>) -> Result<()> {
        self.check_available()?;
        self.rows = rows;
        self.touch();
        Ok(())
    }

    fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }
}
