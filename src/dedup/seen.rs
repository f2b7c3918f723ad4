//! In-process seen-set
//!
//! Remembers exact captures already handled during this run. The key
//! includes the capture second, so a later capture of the same match with
//! moved odds is not suppressed.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

use super::types::{CAPTURE_KEY_ODDS, CAPTURE_KEY_TIME_FORMAT};
use crate::record::MatchRecord;

/// Capture key: teams, full-time score, first odds and capture second
pub fn capture_key(record: &MatchRecord) -> String {
    let odds: String = record
        .detected()
        .iter()
        .take(CAPTURE_KEY_ODDS)
        .map(String::as_str)
        .collect();
    format!(
        "{}_{}_{}_{}",
        record.teams,
        record.full_time_score,
        odds,
        record.captured_at.format(CAPTURE_KEY_TIME_FORMAT)
    )
}

/// Append-only set of capture digests
#[derive(Debug, Default, Clone)]
pub struct SeenSet {
    digests: HashSet<[u8; 32]>,
}

impl SeenSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    fn digest(record: &MatchRecord) -> [u8; 32] {
        let hash = Sha256::digest(capture_key(record).as_bytes());
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hash);
        digest
    }

    /// True when this exact capture was recorded before
    pub fn contains(&self, record: &MatchRecord) -> bool {
        self.digests.contains(&Self::digest(record))
    }

    /// Record a capture; false when it was already present
    pub fn insert(&mut self, record: &MatchRecord) -> bool {
        self.digests.insert(Self::digest(record))
    }

    /// Number of recorded captures
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AssemblerOptions, RecordAssembler};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 19)
            .unwrap()
            .and_hms_opt(20, 0, s)
            .unwrap()
    }

    fn record(odds: &[&str], second: u32) -> MatchRecord {
        let mut lines = vec!["Fenerbahce", "Galatasaray", "1-0"];
        lines.extend_from_slice(odds);
        RecordAssembler::default().assemble(&lines, at(second)).unwrap()
    }

    #[test]
    fn test_capture_key_format() {
        let r = record(&["1,85", "3,20", "4,10"], 5);
        assert_eq!(
            capture_key(&r),
            "Fenerbahce - Galatasaray_1-0_1.853.204.10_20240519200005"
        );
    }

    #[test]
    fn test_capture_key_uses_first_five_odds() {
        let a = record(&["1,85", "3,20", "4,10", "1,20", "1,30", "2,50"], 5);
        let b = record(&["1,85", "3,20", "4,10", "1,20", "1,30", "7,00"], 5);
        assert_eq!(capture_key(&a), capture_key(&b));
    }

    #[test]
    fn test_capture_key_ignores_column_count() {
        let options = AssemblerOptions::builder().odds_columns(2).build();
        let assembler = RecordAssembler::new(options);
        let a = assembler
            .assemble(&["Ajax", "1,85", "3,20", "4,10"], at(5))
            .unwrap();
        let b = assembler
            .assemble(&["Ajax", "1,85", "3,20", "9,90"], at(5))
            .unwrap();
        assert_ne!(capture_key(&a), capture_key(&b));
        assert_eq!(capture_key(&a), "Ajax_0-0_1.853.204.10_20240519200005");
    }

    #[test]
    fn test_seen_set_insert_and_contains() {
        let mut seen = SeenSet::new();
        let r = record(&["1,85", "3,20", "4,10"], 5);

        assert!(!seen.contains(&r));
        assert!(seen.insert(&r));
        assert!(seen.contains(&r));
        assert!(!seen.insert(&r));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_odds_update_is_not_suppressed() {
        let mut seen = SeenSet::new();
        seen.insert(&record(&["1,85", "3,20", "4,10"], 5));

        assert!(!seen.contains(&record(&["1,90", "3,20", "4,00"], 5)));
        assert!(!seen.contains(&record(&["1,85", "3,20", "4,10"], 15)));
    }
}
