//! oddsboard - structured match records from OCR'd betting screens
//!
//! A live-odds screen read by an OCR engine comes back as a bag of lines:
//! team names, decimal odds, a score that may be spelled `I-O`, and plenty of
//! UI chrome. This crate classifies those lines, recovers the score, builds a
//! fixed-width [`MatchRecord`], filters repeats and writes rows to a
//! [`RowSink`].
//!
//! # Modules
//!
//! - [`glyph`]: confusable glyph table
//! - [`score`]: score shapes and hidden-score recovery
//! - [`classify`]: per-line classification
//! - [`record`]: match records and the record assembler
//! - [`dedup`]: in-process seen-set and at-rest cleanup
//! - [`sink`]: row storage backends
//! - [`pipeline`]: capture processing from raw lines to the sink
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use oddsboard::{CapturePipeline, MemorySink, PipelineOptions};
//!
//! let mut pipeline = CapturePipeline::new(MemorySink::new(), PipelineOptions::default());
//! let captured_at = NaiveDate::from_ymd_opt(2024, 5, 19)
//!     .unwrap()
//!     .and_hms_opt(20, 45, 0)
//!     .unwrap();
//! let lines = ["Fenerbahce", "Galatasaray", "1,85", "3,20", "4,10", "I-O"];
//!
//! let outcome = pipeline.process_capture(&lines, captured_at);
//! let record = outcome.record().unwrap();
//! assert_eq!(record.teams, "Fenerbahce - Galatasaray");
//! assert_eq!(record.full_time_score, "1-0");
//! assert!(outcome.is_persisted());
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod glyph;
pub mod pipeline;
pub mod record;
pub mod score;
pub mod sink;
pub mod text;

// Re-exports for convenience
pub use classify::{Category, ClassifiedLine, ClassifierOptions, LineClassifier, LineRule};
pub use cli::{ClassifyArgs, Cli, Commands, DedupeArgs, ParseArgs, StatsArgs};
pub use config::{CliOverrides, Config, ConfigError};
pub use dedup::{
    capture_key, dedupe_rows, find_duplicate_rows, remove_duplicates, CleanupReport,
    ColumnLayout, DedupOptions, Fingerprint, SeenSet, StoreIndex,
};
pub use glyph::GlyphTable;
pub use pipeline::{CaptureOutcome, CapturePipeline, PipelineOptions, RunSummary};
pub use record::{header_row, AssemblerOptions, MatchRecord, RecordAssembler, Row};
pub use score::{HiddenScoreRecoverer, ScoreShapes};
pub use sink::{sheet_stats, JsonFileSink, MemorySink, RowSink, SheetStats, SinkError};
pub use text::{clean_line, split_captures};

/// Process exit codes
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Input file not found
    pub const INPUT_NOT_FOUND: i32 = 3;
    /// Configuration error
    pub const CONFIG_ERROR: i32 = 5;
}
