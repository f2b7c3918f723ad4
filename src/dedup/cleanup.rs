//! At-rest duplicate cleanup
//!
//! Rebuilds the store keeping the first row seen per fingerprint. Running it
//! again on its own output removes nothing.

use std::collections::HashSet;
use tracing::info;

use super::types::{split_header, CleanupReport, DedupOptions, Fingerprint};
use crate::record::Row;
use crate::sink::{self, RowSink};

/// Drop rows whose fingerprint was already seen, keeping the first occurrence
pub fn dedupe_rows(rows: &[Row], options: &DedupOptions) -> (Vec<Row>, CleanupReport) {
    let (header, data) = split_header(rows, options.has_header);

    let mut seen = HashSet::new();
    let mut kept: Vec<Row> = Vec::with_capacity(rows.len());
    kept.extend(header.cloned());

    for row in data {
        if seen.insert(Fingerprint::from_row(row, &options.layout).key()) {
            kept.push(row.clone());
        }
    }

    let kept_data = kept.len() - usize::from(header.is_some());
    let report = CleanupReport {
        scanned: data.len(),
        kept: kept_data,
        removed: data.len() - kept_data,
    };
    (kept, report)
}

/// Remove duplicate rows from a sink. The store is only rewritten when
/// something was removed.
pub fn remove_duplicates<S: RowSink + ?Sized>(
    sink: &mut S,
    options: &DedupOptions,
) -> sink::Result<CleanupReport> {
    let rows = sink.read_all_rows()?;
    let (kept, report) = dedupe_rows(&rows, options);

    if report.removed > 0 {
        sink.replace_all(kept)?;
        info!(
            removed = report.removed,
            kept = report.kept,
            "removed duplicate matches"
        );
    }

    Ok(report)
}
