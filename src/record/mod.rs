//! Match Record module
//!
//! Assembles classified capture lines into one [`MatchRecord`] with teams,
//! scores, a fixed-width odds list and metadata.
//!
//! # Example
//!
//! ```rust
//! use chrono::Local;
//! use oddsboard::RecordAssembler;
//!
//! let assembler = RecordAssembler::default();
//! let lines = ["Fenerbahce", "Galatasaray", "1,85", "3,20", "4,10", "1-0"];
//! let record = assembler.assemble(&lines, Local::now().naive_local()).unwrap();
//! assert_eq!(record.teams, "Fenerbahce - Galatasaray");
//! assert_eq!(record.full_time_score, "1-0");
//! assert_eq!(record.odds.len(), 15);
//! ```

mod assemble;
mod types;

// Re-export public API
pub use assemble::RecordAssembler;
pub use types::{
    header_row, AssemblerOptions, AssemblerOptionsBuilder, MatchRecord, Row, DEFAULT_MIN_ODDS,
    DEFAULT_ODDS_COLUMNS, DEFAULT_SCORE, MAX_ODDS_COLUMNS, ODDS_COLUMN_LABELS, ODDS_PAD,
    TIMESTAMP_FORMAT,
};
