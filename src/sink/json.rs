//! JSON file-backed sink
//!
//! The whole table lives in one JSON document. Every mutation writes the new
//! table to a temporary file next to the store and renames it over the old
//! one, so a failed write leaves the previous table intact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::{Result, RowSink, SinkError};
use crate::record::Row;

/// Current store file version
pub const STORE_VERSION: u32 = 1;

/// Stored table layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRows {
    version: u32,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    rows: Vec<Row>,
}

/// Table persisted as a JSON file
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
    rows: Vec<Row>,
    updated_at: Option<DateTime<Utc>>,
}

impl JsonFileSink {
    /// Open the store at `path`, creating parent directories; a missing file is an empty table
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut sink = Self {
            path,
            rows: Vec::new(),
            updated_at: None,
        };
        sink.load()?;
        Ok(sink)
    }

    /// Reload the table from disk
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let stored: StoredRows = serde_json::from_str(&content)?;
        if stored.version != STORE_VERSION {
            return Err(SinkError::UnsupportedVersion {
                path: self.path.clone(),
                found: stored.version,
                expected: STORE_VERSION,
            });
        }

        self.rows = stored.rows;
        self.updated_at = stored.updated_at;
        Ok(())
    }

    /// Store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows are stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Persist `rows` and adopt them only after the file is in place
    fn commit(&mut self, rows: Vec<Row>) -> Result<()> {
        let updated_at = Utc::now();
        let stored = StoredRows {
            version: STORE_VERSION,
            updated_at: Some(updated_at),
            rows,
        };
        let content = serde_json::to_vec_pretty(&stored)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| SinkError::Io(e.error))?;

        debug!(path = %self.path.display(), rows = stored.rows.len(), "store written");
        self.rows = stored.rows;
        self.updated_at = Some(updated_at);
        Ok(())
    }
}

impl RowSink for JsonFileSink {
    fn append_row(&mut self, row: Row) -> Result<()> {
        self.append_rows(vec![row])
    }

    fn append_rows(&mut self, rows: Vec<Row>) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut next = self.rows.clone();
        next.extend(rows);
        self.commit(next)
    }

    fn read_all_rows(&self) -> Result<Vec<Row>> {
        Ok(self.rows.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())
    }

    fn replace_all(&mut self, rows: Vec<Row>) -> Result<()> {
        self.commit(rows)
    }

    fn last_update(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}
