//! Deduplication types

use crate::record::{MatchRecord, Row};

// ============================================================
// Constants
// ============================================================

/// Separator between fingerprint components
pub const FINGERPRINT_SEPARATOR: char = '|';

/// Odds included in a capture key
pub const CAPTURE_KEY_ODDS: usize = 5;

/// Capture time resolution for capture keys
pub const CAPTURE_KEY_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

// ============================================================
// Column Layout
// ============================================================

/// Where the fingerprint components sit in a persisted row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// League column
    pub league: Option<usize>,
    /// Date column
    pub date: Option<usize>,
    /// Teams column
    pub teams: usize,
}

impl Default for ColumnLayout {
    /// League, date and teams in the first three columns
    fn default() -> Self {
        Self {
            league: Some(0),
            date: Some(1),
            teams: 2,
        }
    }
}

impl ColumnLayout {
    /// Layout of rows written from [`MatchRecord::to_row`]: teams first, no league or date
    pub fn record_rows() -> Self {
        Self {
            league: None,
            date: None,
            teams: 0,
        }
    }
}

// ============================================================
// Fingerprint
// ============================================================

/// `league|date|teams` identity of a match, irrespective of score or odds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    league: String,
    date: String,
    teams: String,
}

impl Fingerprint {
    /// Fingerprint from all three components
    pub fn new(league: impl Into<String>, date: impl Into<String>, teams: impl Into<String>) -> Self {
        Self {
            league: league.into(),
            date: date.into(),
            teams: teams.into(),
        }
    }

    /// Fingerprint without league or date
    pub fn teams_only(teams: impl Into<String>) -> Self {
        Self::new("", "", teams)
    }

    /// Fingerprint of a record; records carry no league or date
    pub fn from_record(record: &MatchRecord) -> Self {
        Self::teams_only(record.teams.clone())
    }

    /// Fingerprint of a persisted row. Missing cells become empty components.
    pub fn from_row(row: &[String], layout: &ColumnLayout) -> Self {
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .map(|c| c.trim().to_string())
                .unwrap_or_default()
        };
        Self {
            league: cell(layout.league),
            date: cell(layout.date),
            teams: cell(Some(layout.teams)),
        }
    }

    /// True when league or date is known
    pub fn has_context(&self) -> bool {
        !self.league.is_empty() || !self.date.is_empty()
    }

    /// Teams component
    pub fn teams(&self) -> &str {
        &self.teams
    }

    /// `league|date|teams`, or `teams` alone without league and date
    pub fn key(&self) -> String {
        if self.has_context() {
            format!(
                "{}{sep}{}{sep}{}",
                self.league,
                self.date,
                self.teams,
                sep = FINGERPRINT_SEPARATOR
            )
        } else {
            self.teams.clone()
        }
    }
}

/// Options for at-rest deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupOptions {
    /// Fingerprint column positions
    pub layout: ColumnLayout,
    /// First row is a header and is never fingerprinted
    pub has_header: bool,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::default(),
            has_header: true,
        }
    }
}

/// Outcome of an at-rest cleanup pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CleanupReport {
    /// Data rows examined
    pub scanned: usize,
    /// Data rows kept
    pub kept: usize,
    /// Duplicate rows removed
    pub removed: usize,
}

/// Split a header row off the front of `rows` when configured
pub(crate) fn split_header(rows: &[Row], has_header: bool) -> (Option<&Row>, &[Row]) {
    match rows.split_first() {
        Some((header, data)) if has_header => (Some(header), data),
        _ => (None, rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_fingerprint_key() {
        let fp = Fingerprint::new("Super Lig", "2024-05-19", "Fenerbahce - Galatasaray");
        assert_eq!(fp.key(), "Super Lig|2024-05-19|Fenerbahce - Galatasaray");
        assert!(fp.has_context());

        let fp = Fingerprint::teams_only("Ajax - PSV");
        assert_eq!(fp.key(), "Ajax - PSV");
        assert!(!fp.has_context());
    }

    #[test]
    fn test_from_row_default_layout() {
        let fp = Fingerprint::from_row(
            &row(&["Super Lig", "2024-05-19", "Ajax - PSV", "1.85"]),
            &ColumnLayout::default(),
        );
        assert_eq!(fp.key(), "Super Lig|2024-05-19|Ajax - PSV");
    }

    #[test]
    fn test_from_short_row_uses_empty_components() {
        let fp = Fingerprint::from_row(&row(&["Super Lig"]), &ColumnLayout::default());
        assert_eq!(fp.key(), "Super Lig||");

        let fp = Fingerprint::from_row(&[], &ColumnLayout::default());
        assert_eq!(fp.key(), "");
    }

    #[test]
    fn test_from_row_record_layout() {
        let fp = Fingerprint::from_row(
            &row(&["Ajax - PSV", "0-0", "1-0"]),
            &ColumnLayout::record_rows(),
        );
        assert_eq!(fp, Fingerprint::teams_only("Ajax - PSV"));
    }

    #[test]
    fn test_split_header() {
        let rows = vec![row(&["h"]), row(&["a"])];
        let (header, data) = split_header(&rows, true);
        assert_eq!(header, Some(&row(&["h"])));
        assert_eq!(data.len(), 1);

        let (header, data) = split_header(&rows, false);
        assert!(header.is_none());
        assert_eq!(data.len(), 2);

        let (header, data) = split_header(&[], true);
        assert!(header.is_none());
        assert!(data.is_empty());
    }
}
