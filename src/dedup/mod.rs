//! Deduplication module
//!
//! Two scopes:
//!
//! - **In-process** ([`SeenSet`]): exact captures already handled in this run,
//!   keyed by teams, score, first five odds and capture second
//! - **At rest** ([`remove_duplicates`], [`StoreIndex`]): rows in the store
//!   sharing a `league|date|teams` fingerprint, regardless of timestamp
//!
//! # Example
//!
//! ```rust
//! use oddsboard::{remove_duplicates, DedupOptions, MemorySink};
//!
//! let row = |cells: &[&str]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
//! let mut sink = MemorySink::with_rows(vec![
//!     row(&["League", "Date", "Teams"]),
//!     row(&["Super Lig", "2024-05-19", "Ajax - PSV"]),
//!     row(&["Super Lig", "2024-05-19", "Ajax - PSV"]),
//! ]);
//! let report = remove_duplicates(&mut sink, &DedupOptions::default()).unwrap();
//! assert_eq!(report.removed, 1);
//! ```

mod cleanup;
mod index;
mod seen;
mod types;

// Re-export public API
pub use cleanup::{dedupe_rows, remove_duplicates};
pub use index::{find_duplicate_rows, StoreIndex};
pub use seen::{capture_key, SeenSet};
pub use types::{
    CleanupReport, ColumnLayout, DedupOptions, Fingerprint, CAPTURE_KEY_ODDS,
    CAPTURE_KEY_TIME_FORMAT, FINGERPRINT_SEPARATOR,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_options_default() {
        let opts = DedupOptions::default();
        assert!(opts.has_header);
        assert_eq!(opts.layout.league, Some(0));
        assert_eq!(opts.layout.date, Some(1));
        assert_eq!(opts.layout.teams, 2);
    }

    #[test]
    fn test_cleanup_report_default() {
        let report = CleanupReport::default();
        assert_eq!(report.removed, 0);
        assert_eq!(report.kept, 0);
    }
}
