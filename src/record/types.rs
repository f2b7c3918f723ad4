//! Match record types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::classify::ClassifierOptions;

// ============================================================
// Constants
// ============================================================

/// Default number of odds columns in a record
pub const DEFAULT_ODDS_COLUMNS: usize = 15;

/// Largest configurable odds column count
pub const MAX_ODDS_COLUMNS: usize = 64;

/// Odds needed for the assembler to accept a capture without team names
pub const DEFAULT_MIN_ODDS: usize = 3;

/// Score used when none was found
pub const DEFAULT_SCORE: &str = "0-0";

/// Sentinel filling unused odds columns
pub const ODDS_PAD: &str = "0";

/// Timestamp format for persisted rows
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column labels of the odds grid, in screen order
pub const ODDS_COLUMN_LABELS: &[&str] = &[
    "Match Result 1",
    "Match Result X",
    "Match Result 2",
    "Double Chance 1-X",
    "Double Chance 1-2",
    "Double Chance X-2",
    "Handicap (1:0) 1",
    "Handicap (1:0) X",
    "Handicap (1:0) 2",
    "Handicap (2:0) 1",
    "Handicap (2:0) X",
    "Handicap (2:0) 2",
];

/// A persisted row: ordered scalar cells
pub type Row = Vec<String>;

// ============================================================
// Core Data Structures
// ============================================================

/// One structured match record assembled from a capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// `Home - Away`, a single team, or a timestamped placeholder
    pub teams: String,
    /// Half-time score, `0-0` when unknown
    pub half_time_score: String,
    /// Full-time score as `D-D`, `0-0` when unknown
    pub full_time_score: String,
    /// Odds in encounter order, padded or truncated to the column count
    pub odds: Vec<String>,
    /// Every detected odds value, before padding or truncation
    #[serde(default)]
    pub raw_odds: Vec<String>,
    /// Capture time
    pub captured_at: NaiveDateTime,
    /// Human-readable summary
    pub status_note: String,
    /// Odds detected before padding or truncation
    pub detected_odds: usize,
    /// True when `teams` is a synthesized placeholder
    pub placeholder_teams: bool,
}

impl MatchRecord {
    /// Formatted capture time
    pub fn timestamp(&self) -> String {
        self.captured_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Odds that were actually detected, independent of the column count
    pub fn detected(&self) -> &[String] {
        &self.raw_odds
    }

    /// Row cells: teams, scores, odds columns, timestamp, status
    pub fn to_row(&self) -> Row {
        let mut row = Vec::with_capacity(self.odds.len() + 5);
        row.push(self.teams.clone());
        row.push(self.half_time_score.clone());
        row.push(self.full_time_score.clone());
        row.extend(self.odds.iter().cloned());
        row.push(self.timestamp());
        row.push(self.status_note.clone());
        row
    }
}

/// Header row for a record layout with `odds_columns` odds
pub fn header_row(odds_columns: usize) -> Row {
    let mut row = vec![
        "Teams".to_string(),
        "Half-Time Score".to_string(),
        "Full-Time Score".to_string(),
    ];
    for i in 0..odds_columns {
        match ODDS_COLUMN_LABELS.get(i) {
            Some(label) => row.push(label.to_string()),
            None => row.push(format!("Extra Odds {}", i + 1 - ODDS_COLUMN_LABELS.len())),
        }
    }
    row.push("Timestamp".to_string());
    row.push("Status".to_string());
    row
}

// ============================================================
// Options
// ============================================================

/// Record assembler options
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerOptions {
    /// Fixed odds column count
    pub odds_columns: usize,
    /// Odds needed to accept a capture without team names
    pub min_odds: usize,
    /// Line classifier options
    pub classifier: ClassifierOptions,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            odds_columns: DEFAULT_ODDS_COLUMNS,
            min_odds: DEFAULT_MIN_ODDS,
            classifier: ClassifierOptions::default(),
        }
    }
}

impl AssemblerOptions {
    /// Create a new options builder
    pub fn builder() -> AssemblerOptionsBuilder {
        AssemblerOptionsBuilder::default()
    }
}

/// Builder for AssemblerOptions
#[derive(Debug, Default)]
pub struct AssemblerOptionsBuilder {
    options: AssemblerOptions,
}

impl AssemblerOptionsBuilder {
    /// Set odds column count (clamped to 1-64)
    #[must_use]
    pub fn odds_columns(mut self, columns: usize) -> Self {
        self.options.odds_columns = columns.clamp(1, MAX_ODDS_COLUMNS);
        self
    }

    /// Set the odds count accepted without team names
    #[must_use]
    pub fn min_odds(mut self, min: usize) -> Self {
        self.options.min_odds = min;
        self
    }

    /// Set classifier options
    #[must_use]
    pub fn classifier(mut self, classifier: ClassifierOptions) -> Self {
        self.options.classifier = classifier;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> AssemblerOptions {
        self.options
    }
}
