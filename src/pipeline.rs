//! Capture pipeline
//!
//! Drives one capture at a time through assembly, the persistence gate, the
//! in-process seen-set and the sink:
//!
//! ```text
//! raw lines -> RecordAssembler -> odds gate -> SeenSet -> (StoreIndex) -> RowSink
//! ```
//!
//! The assembler accepts a capture with team names and no odds, but only
//! records with at least [`DEFAULT_PERSIST_MIN_ODDS`] odds reach the sink.
//! Sink failures are reported and the record is dropped; nothing is retried
//! or re-queued.

use chrono::{Local, NaiveDateTime};
use std::fmt;
use tracing::{debug, info, warn};

use crate::dedup::{ColumnLayout, DedupOptions, Fingerprint, SeenSet, StoreIndex};
use crate::record::{header_row, AssemblerOptions, MatchRecord, RecordAssembler};
use crate::sink::{RowSink, SinkError};

/// Odds a record needs before it is written
pub const DEFAULT_PERSIST_MIN_ODDS: usize = 3;

/// Pipeline options
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Assembler options
    pub assembler: AssemblerOptions,
    /// Odds a record needs before it is written
    pub persist_min_odds: usize,
    /// Write a header row into an empty store before the first record
    pub write_header: bool,
    /// The store's first row is a header
    pub has_header: bool,
    /// Skip records whose teams are already in the store
    pub skip_persisted: bool,
    /// Column layout of rows in the store
    pub layout: ColumnLayout,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            assembler: AssemblerOptions::default(),
            persist_min_odds: DEFAULT_PERSIST_MIN_ODDS,
            write_header: true,
            has_header: true,
            skip_persisted: false,
            layout: ColumnLayout::record_rows(),
        }
    }
}

/// What happened to one capture
#[derive(Debug)]
pub enum CaptureOutcome {
    /// Written to the sink
    Persisted(MatchRecord),
    /// Neither team names nor enough odds
    InsufficientSignal,
    /// Assembled, but below the persistence odds threshold
    InsufficientOdds(MatchRecord),
    /// Exact capture already handled in this run
    Duplicate(MatchRecord),
    /// Match already present in the store
    AlreadyStored(MatchRecord),
    /// Sink rejected the write; the record was dropped
    SinkFailed {
        record: MatchRecord,
        error: SinkError,
    },
}

impl CaptureOutcome {
    /// Assembled record, if any
    pub fn record(&self) -> Option<&MatchRecord> {
        match self {
            CaptureOutcome::Persisted(record)
            | CaptureOutcome::InsufficientOdds(record)
            | CaptureOutcome::Duplicate(record)
            | CaptureOutcome::AlreadyStored(record)
            | CaptureOutcome::SinkFailed { record, .. } => Some(record),
            CaptureOutcome::InsufficientSignal => None,
        }
    }

    /// True when the record reached the sink
    pub fn is_persisted(&self) -> bool {
        matches!(self, CaptureOutcome::Persisted(_))
    }
}

impl fmt::Display for CaptureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureOutcome::Persisted(r) => write!(f, "persisted: {}", r.teams),
            CaptureOutcome::InsufficientSignal => write!(f, "no meaningful data"),
            CaptureOutcome::InsufficientOdds(r) => {
                write!(f, "not enough odds ({} found): {}", r.detected_odds, r.teams)
            }
            CaptureOutcome::Duplicate(r) => write!(f, "duplicate capture: {}", r.teams),
            CaptureOutcome::AlreadyStored(r) => write!(f, "already stored: {}", r.teams),
            CaptureOutcome::SinkFailed { record, error } => {
                write!(f, "write failed for {}: {}", record.teams, error)
            }
        }
    }
}

/// Outcome counters for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    pub captures: usize,
    pub persisted: usize,
    pub insufficient: usize,
    pub duplicates: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Count one outcome
    pub fn record(&mut self, outcome: &CaptureOutcome) {
        self.captures += 1;
        match outcome {
            CaptureOutcome::Persisted(_) => self.persisted += 1,
            CaptureOutcome::InsufficientSignal | CaptureOutcome::InsufficientOdds(_) => {
                self.insufficient += 1
            }
            CaptureOutcome::Duplicate(_) | CaptureOutcome::AlreadyStored(_) => {
                self.duplicates += 1
            }
            CaptureOutcome::SinkFailed { .. } => self.failed += 1,
        }
    }
}

/// Runs captures through assembly, gating, deduplication and the sink
#[derive(Debug)]
pub struct CapturePipeline<S: RowSink> {
    assembler: RecordAssembler,
    options: PipelineOptions,
    sink: S,
    seen: SeenSet,
    index: Option<StoreIndex>,
    header_checked: bool,
}

impl<S: RowSink> CapturePipeline<S> {
    /// Create a pipeline writing to `sink`
    pub fn new(sink: S, options: PipelineOptions) -> Self {
        Self {
            assembler: RecordAssembler::new(options.assembler.clone()),
            options,
            sink,
            seen: SeenSet::new(),
            index: None,
            header_checked: false,
        }
    }

    /// Pipeline options
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Record assembler
    pub fn assembler(&self) -> &RecordAssembler {
        &self.assembler
    }

    /// Captures recorded as handled in this run
    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// Underlying sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Underlying sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the pipeline and return the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Process a capture stamped with the current local time
    pub fn process_now<L: AsRef<str>>(&mut self, raw_lines: &[L]) -> CaptureOutcome {
        self.process_capture(raw_lines, Local::now().naive_local())
    }

    /// Process one capture
    pub fn process_capture<L: AsRef<str>>(
        &mut self,
        raw_lines: &[L],
        captured_at: NaiveDateTime,
    ) -> CaptureOutcome {
        let Some(record) = self.assembler.assemble(raw_lines, captured_at) else {
            debug!(lines = raw_lines.len(), "no meaningful data in capture");
            return CaptureOutcome::InsufficientSignal;
        };

        if record.detected_odds < self.options.persist_min_odds {
            debug!(
                found = record.detected_odds,
                needed = self.options.persist_min_odds,
                "not enough odds to persist"
            );
            return CaptureOutcome::InsufficientOdds(record);
        }

        if self.seen.contains(&record) {
            debug!(teams = %record.teams, "capture already handled");
            return CaptureOutcome::Duplicate(record);
        }

        if self.options.skip_persisted {
            match self.store_index() {
                Ok(index) if index.contains_record(&record) => {
                    debug!(teams = %record.teams, "match already in store");
                    return CaptureOutcome::AlreadyStored(record);
                }
                Ok(_) => {}
                Err(error) => return Self::failed(record, error),
            }
        }

        if let Err(error) = self.ensure_header() {
            return Self::failed(record, error);
        }

        match self.sink.append_row(record.to_row()) {
            Ok(()) => {
                self.seen.insert(&record);
                if let Some(index) = self.index.as_mut() {
                    index.insert(Fingerprint::from_record(&record));
                }
                info!(
                    teams = %record.teams,
                    ht = %record.half_time_score,
                    ft = %record.full_time_score,
                    odds = record.detected_odds,
                    "record written"
                );
                CaptureOutcome::Persisted(record)
            }
            Err(error) => Self::failed(record, error),
        }
    }

    fn failed(record: MatchRecord, error: SinkError) -> CaptureOutcome {
        warn!(teams = %record.teams, %error, "failed to save record");
        CaptureOutcome::SinkFailed { record, error }
    }

    fn store_index(&mut self) -> Result<&StoreIndex, SinkError> {
        if self.index.is_none() {
            let rows = self.sink.read_all_rows()?;
            let options = DedupOptions {
                layout: self.options.layout,
                has_header: self.options.has_header,
            };
            self.index = Some(StoreIndex::from_rows(&rows, &options));
        }
        Ok(self.index.get_or_insert_with(StoreIndex::default))
    }

    /// Write the header row into an empty store, once per pipeline
    fn ensure_header(&mut self) -> Result<(), SinkError> {
        if !self.options.write_header || self.header_checked {
            return Ok(());
        }
        if self.sink.read_all_rows()?.is_empty() {
            self.sink
                .append_row(header_row(self.options.assembler.odds_columns))?;
            info!("header row written");
        }
        self.header_checked = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use chrono::NaiveDate;

    fn at(s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 19)
            .unwrap()
            .and_hms_opt(20, 0, s)
            .unwrap()
    }

    fn pipeline() -> CapturePipeline<MemorySink> {
        CapturePipeline::new(MemorySink::new(), PipelineOptions::default())
    }

    const CAPTURE: [&str; 7] = [
        "NESINE",
        "Fenerbahce",
        "Galatasaray",
        "1,85",
        "3,20",
        "4,10",
        "1-0",
    ];

    #[test]
    fn test_persists_with_header() {
        let mut p = pipeline();
        let outcome = p.process_capture(&CAPTURE, at(0));
        assert!(outcome.is_persisted());

        let rows = p.sink().rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Teams");
        assert_eq!(rows[1][0], "Fenerbahce - Galatasaray");
        assert_eq!(rows[1][2], "1-0");
        assert_eq!(rows[1].len(), 20);
    }

    #[test]
    fn test_header_written_once() {
        let mut p = pipeline();
        p.process_capture(&CAPTURE, at(0));
        p.process_capture(&CAPTURE, at(1));
        let headers = p.sink().rows().iter().filter(|r| r[0] == "Teams").count();
        assert_eq!(headers, 1);
        assert_eq!(p.sink().len(), 3);
    }

    #[test]
    fn test_no_header_when_disabled() {
        let options = PipelineOptions {
            write_header: false,
            ..Default::default()
        };
        let mut p = CapturePipeline::new(MemorySink::new(), options);
        p.process_capture(&CAPTURE, at(0));
        assert_eq!(p.sink().len(), 1);
    }

    #[test]
    fn test_team_only_record_is_not_persisted() {
        let mut p = pipeline();
        let outcome = p.process_capture(&["Fenerbahce", "Galatasaray", "1,85"], at(0));
        assert!(matches!(outcome, CaptureOutcome::InsufficientOdds(_)));
        assert!(outcome.record().is_some());
        assert!(p.sink().is_empty());
    }

    #[test]
    fn test_two_odds_without_teams() {
        let mut p = pipeline();
        let outcome = p.process_capture(&["1,85", "3,20"], at(0));
        assert!(matches!(outcome, CaptureOutcome::InsufficientSignal));
        assert!(p.sink().is_empty());
    }

    #[test]
    fn test_three_odds_without_teams_uses_placeholder() {
        let mut p = pipeline();
        let outcome = p.process_capture(&["1,85", "3,20", "4,10"], at(7));
        let CaptureOutcome::Persisted(record) = outcome else {
            panic!("expected a persisted record");
        };
        assert_eq!(record.teams, "Odds data 20:00:07");
    }

    #[test]
    fn test_exact_duplicate_capture() {
        let mut p = pipeline();
        assert!(p.process_capture(&CAPTURE, at(0)).is_persisted());
        let outcome = p.process_capture(&CAPTURE, at(0));
        assert!(matches!(outcome, CaptureOutcome::Duplicate(_)));
        assert_eq!(p.seen().len(), 1);
    }

    #[test]
    fn test_odds_update_same_match_is_persisted() {
        let mut p = pipeline();
        p.process_capture(&CAPTURE, at(0));
        let mut updated = CAPTURE;
        updated[3] = "1,95";
        assert!(p.process_capture(&updated, at(0)).is_persisted());
    }

    #[test]
    fn test_skip_persisted_matches() {
        let options = PipelineOptions {
            skip_persisted: true,
            ..Default::default()
        };
        let mut p = CapturePipeline::new(MemorySink::new(), options);
        assert!(p.process_capture(&CAPTURE, at(0)).is_persisted());
        let outcome = p.process_capture(&CAPTURE, at(30));
        assert!(matches!(outcome, CaptureOutcome::AlreadyStored(_)));
    }

    #[test]
    fn test_skip_persisted_in_headerless_store() {
        let options = PipelineOptions {
            write_header: false,
            has_header: false,
            ..Default::default()
        };
        let mut first = CapturePipeline::new(MemorySink::new(), options.clone());
        assert!(first.process_capture(&CAPTURE, at(0)).is_persisted());

        let options = PipelineOptions {
            skip_persisted: true,
            ..options
        };
        let mut second = CapturePipeline::new(first.into_sink(), options);
        let outcome = second.process_capture(&CAPTURE, at(30));
        assert!(matches!(outcome, CaptureOutcome::AlreadyStored(_)));
        assert_eq!(second.sink().len(), 1);
    }

    #[test]
    fn test_sink_failure_drops_record() {
        let mut p = pipeline();
        p.sink_mut().set_unavailable(Some("quota exceeded"));

        let outcome = p.process_capture(&CAPTURE, at(0));
        assert!(matches!(outcome, CaptureOutcome::SinkFailed { .. }));
        assert!(p.seen().is_empty());

        p.sink_mut().set_unavailable(None);
        assert!(p.sink().is_empty());
        // Not marked as seen, so the same capture can be written later
        assert!(p.process_capture(&CAPTURE, at(0)).is_persisted());
    }

    #[test]
    fn test_run_summary() {
        let mut p = pipeline();
        let mut summary = RunSummary::default();
        summary.record(&p.process_capture(&CAPTURE, at(0)));
        summary.record(&p.process_capture(&CAPTURE, at(0)));
        summary.record(&p.process_capture(&["NESINE"], at(1)));
        assert_eq!(summary.captures, 3);
        assert_eq!(summary.persisted, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(summary.insufficient, 1);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_outcome_display() {
        let mut p = pipeline();
        let outcome = p.process_capture(&CAPTURE, at(0));
        assert_eq!(outcome.to_string(), "persisted: Fenerbahce - Galatasaray");
        assert_eq!(
            CaptureOutcome::InsufficientSignal.to_string(),
            "no meaningful data"
        );
    }
}
