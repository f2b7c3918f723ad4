//! Record assembly
//!
//! Turns one capture's lines into a single [`MatchRecord`]:
//!
//! 1. Clean and classify every line
//! 2. Collect odds and team candidates in encounter order
//! 3. Recover the full-time score from the whole capture
//! 4. Resolve the team field and fit the odds to the column count
//!
//! A capture with no team candidate and fewer than the minimum odds yields
//! nothing.

use chrono::NaiveDateTime;
use tracing::debug;

use super::types::{AssemblerOptions, MatchRecord, DEFAULT_SCORE, ODDS_PAD};
use crate::classify::{Category, ClassifiedLine, LineClassifier};
use crate::score::HiddenScoreRecoverer;

/// Builds match records from classified capture lines
#[derive(Debug)]
pub struct RecordAssembler {
    classifier: LineClassifier,
    recoverer: HiddenScoreRecoverer,
    options: AssemblerOptions,
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(AssemblerOptions::default())
    }
}

impl RecordAssembler {
    /// Create an assembler with the default recoverer
    pub fn new(options: AssemblerOptions) -> Self {
        Self::with_recoverer(options, HiddenScoreRecoverer::default())
    }

    /// Create an assembler with a custom score recoverer
    pub fn with_recoverer(options: AssemblerOptions, recoverer: HiddenScoreRecoverer) -> Self {
        Self {
            classifier: LineClassifier::new(&options.classifier),
            recoverer,
            options,
        }
    }

    /// Assembler options
    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    /// Line classifier used for each capture
    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Assemble a record from raw OCR lines
    pub fn assemble<S: AsRef<str>>(
        &self,
        raw_lines: &[S],
        captured_at: NaiveDateTime,
    ) -> Option<MatchRecord> {
        let lines = self.classifier.classify_all(raw_lines);
        for (index, line) in lines.iter().enumerate() {
            debug!(index, text = line.text(), category = %line.category(), "capture line");
        }
        self.assemble_classified(&lines, captured_at)
    }

    /// Assemble a record from lines that were already cleaned and classified
    pub fn assemble_classified(
        &self,
        lines: &[ClassifiedLine],
        captured_at: NaiveDateTime,
    ) -> Option<MatchRecord> {
        let odds: Vec<String> = lines
            .iter()
            .filter(|l| l.is(Category::Odds))
            .map(|l| l.text().replace(',', "."))
            .collect();
        let team_candidates: Vec<&str> = lines
            .iter()
            .filter(|l| l.is(Category::TeamCandidate))
            .map(ClassifiedLine::text)
            .collect();

        let teams = resolve_teams(&team_candidates);
        if teams.is_none() && odds.len() < self.options.min_odds {
            debug!(
                odds = odds.len(),
                min_odds = self.options.min_odds,
                "insufficient signal"
            );
            return None;
        }

        let texts: Vec<&str> = lines.iter().map(ClassifiedLine::text).collect();
        let full_time_score = self
            .recoverer
            .recover(&texts)
            .unwrap_or_else(|| DEFAULT_SCORE.to_string());

        let detected_odds = odds.len();
        let placeholder_teams = teams.is_none();
        let teams = teams.unwrap_or_else(|| placeholder_teams_label(captured_at));

        debug!(
            teams = %teams,
            score = %full_time_score,
            odds = detected_odds,
            "assembled record"
        );

        Some(MatchRecord {
            teams,
            half_time_score: DEFAULT_SCORE.to_string(),
            full_time_score,
            raw_odds: odds.clone(),
            odds: fit_odds(odds, self.options.odds_columns),
            captured_at,
            status_note: format!("Active - {} odds found", detected_odds),
            detected_odds,
            placeholder_teams,
        })
    }
}

/// First two candidates joined as `Home - Away`, or the only one
fn resolve_teams(candidates: &[&str]) -> Option<String> {
    match candidates {
        [] => None,
        [only] => Some(only.to_string()),
        [home, away, ..] => Some(format!("{} - {}", home, away)),
    }
}

/// Placeholder keeping team-less records distinguishable
fn placeholder_teams_label(captured_at: NaiveDateTime) -> String {
    format!("Odds data {}", captured_at.format("%H:%M:%S"))
}

/// Truncate to `columns`, keeping the earliest odds, then pad with the sentinel
fn fit_odds(mut odds: Vec<String>, columns: usize) -> Vec<String> {
    odds.truncate(columns);
    odds.resize(columns, ODDS_PAD.to_string());
    odds
}
