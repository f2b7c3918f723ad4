//! Lookup of matches already present in the store

use std::collections::HashSet;

use super::types::{split_header, ColumnLayout, DedupOptions, Fingerprint};
use crate::record::{MatchRecord, Row};

/// Fingerprints of the rows currently in the store
#[derive(Debug, Default, Clone)]
pub struct StoreIndex {
    keys: HashSet<String>,
    teams: HashSet<String>,
}

impl StoreIndex {
    /// Index the data rows of a store snapshot
    pub fn from_rows(rows: &[Row], options: &DedupOptions) -> Self {
        let (_, data) = split_header(rows, options.has_header);
        let mut index = Self::default();
        for row in data {
            index.insert(Fingerprint::from_row(row, &options.layout));
        }
        index
    }

    /// Add a fingerprint
    pub fn insert(&mut self, fingerprint: Fingerprint) {
        self.teams.insert(fingerprint.teams().to_string());
        self.keys.insert(fingerprint.key());
    }

    /// True when the fingerprint is present; without league or date only teams are compared
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        if fingerprint.has_context() {
            self.keys.contains(&fingerprint.key())
        } else {
            self.teams.contains(fingerprint.teams())
        }
    }

    /// True when the store already holds this record's match
    pub fn contains_record(&self, record: &MatchRecord) -> bool {
        self.contains(&Fingerprint::from_record(record))
    }

    /// Number of distinct fingerprints
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// 1-based sheet row numbers (header is row 1) whose teams match, optionally
/// restricted to a date
pub fn find_duplicate_rows(
    rows: &[Row],
    teams: &str,
    date: Option<&str>,
    layout: &ColumnLayout,
) -> Vec<usize> {
    let (header, data) = split_header(rows, true);
    let first_data_row = if header.is_some() { 2 } else { 1 };

    data.iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let fingerprint = Fingerprint::from_row(row, layout);
            let date_matches = date.map_or(true, |d| {
                layout
                    .date
                    .and_then(|col| row.get(col))
                    .is_some_and(|cell| cell.trim() == d)
            });
            (fingerprint.teams() == teams && date_matches).then_some(i + first_data_row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn rows() -> Vec<Row> {
        vec![
            row(&["League", "Date", "Teams"]),
            row(&["Super Lig", "2024-05-19", "Ajax - PSV"]),
            row(&["Super Lig", "2024-05-26", "Ajax - PSV"]),
            row(&["Super Lig", "2024-05-26", "Porto - Benfica"]),
        ]
    }

    #[test]
    fn test_index_full_key() {
        let index = StoreIndex::from_rows(&rows(), &DedupOptions::default());
        assert_eq!(index.len(), 3);
        assert!(index.contains(&Fingerprint::new("Super Lig", "2024-05-26", "Ajax - PSV")));
        assert!(!index.contains(&Fingerprint::new("Super Lig", "2024-06-02", "Ajax - PSV")));
    }

    #[test]
    fn test_index_teams_only() {
        let index = StoreIndex::from_rows(&rows(), &DedupOptions::default());
        assert!(index.contains(&Fingerprint::teams_only("Porto - Benfica")));
        assert!(!index.contains(&Fingerprint::teams_only("Braga - Porto")));
    }

    #[test]
    fn test_header_not_indexed() {
        let index = StoreIndex::from_rows(&rows(), &DedupOptions::default());
        assert!(!index.contains(&Fingerprint::teams_only("Teams")));
    }

    #[test]
    fn test_find_duplicate_rows() {
        let layout = ColumnLayout::default();
        assert_eq!(find_duplicate_rows(&rows(), "Ajax - PSV", None, &layout), vec![2, 3]);
        assert_eq!(
            find_duplicate_rows(&rows(), "Ajax - PSV", Some("2024-05-26"), &layout),
            vec![3]
        );
        assert!(find_duplicate_rows(&rows(), "Braga - Porto", None, &layout).is_empty());
    }
}
