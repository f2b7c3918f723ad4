//! Hidden score recovery
//!
//! Scans a capture line by line for score shapes built from confusable glyphs.
//! The first line that matches is normalized and the first `D-D` span in it is
//! returned. Later lines are never consulted, so an unrelated hyphenated digit
//! pair early in the capture wins over the real score.

use regex::Regex;
use tracing::debug;

use super::types::{ScorePattern, CANONICAL_SCORE_PATTERN, DEFAULT_SCORE_PAIRS};
use crate::glyph::GlyphTable;
use crate::text::clean_line;

/// Recovers a full-time score from a capture's lines
#[derive(Debug, Clone)]
pub struct HiddenScoreRecoverer {
    table: GlyphTable,
    patterns: Vec<ScorePattern>,
    canonical: Regex,
}

impl Default for HiddenScoreRecoverer {
    fn default() -> Self {
        Self::with_pairs(GlyphTable::default(), &DEFAULT_SCORE_PAIRS)
            .expect("glyph classes are escaped before compiling")
    }
}

impl HiddenScoreRecoverer {
    /// Build a recoverer for the given digit pairs, in priority order
    pub fn with_pairs(table: GlyphTable, pairs: &[(char, char)]) -> Result<Self, regex::Error> {
        let patterns = pairs
            .iter()
            .map(|&(lhs, rhs)| ScorePattern::confusable(&table, lhs, rhs))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            table,
            patterns,
            canonical: Regex::new(CANONICAL_SCORE_PATTERN)?,
        })
    }

    /// Patterns in evaluation order
    pub fn patterns(&self) -> &[ScorePattern] {
        &self.patterns
    }

    /// Glyph table used for normalization
    pub fn glyph_table(&self) -> &GlyphTable {
        &self.table
    }

    /// First recoverable score across `lines`, as `D-D`
    pub fn recover<S: AsRef<str>>(&self, lines: &[S]) -> Option<String> {
        lines
            .iter()
            .find_map(|line| self.recover_line(&clean_line(line.as_ref())))
    }

    /// Recoverable score in a single cleaned line
    pub fn recover_line(&self, line: &str) -> Option<String> {
        let pattern = self.patterns.iter().find(|p| p.test(line))?;

        let normalized = self.table.normalize(line);
        let span = self.canonical.find(&normalized)?;
        let score: String = span
            .as_str()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        debug!(line, pattern = pattern.name(), score = %score, "recovered hidden score");
        Some(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recover_confused_one_zero() {
        let recoverer = HiddenScoreRecoverer::default();
        assert_eq!(recoverer.recover_line("I-O"), Some("1-0".to_string()));
    }

    #[test]
    fn test_recover_spaced_two_one() {
        let recoverer = HiddenScoreRecoverer::default();
        assert_eq!(recoverer.recover_line("2 - l"), Some("2-1".to_string()));
    }

    #[test]
    fn test_recover_em_dash() {
        let recoverer = HiddenScoreRecoverer::default();
        assert_eq!(
            recoverer.recover_line("3 \u{2014} Q"),
            Some("3-0".to_string())
        );
    }

    #[test]
    fn test_recover_clean_score() {
        let recoverer = HiddenScoreRecoverer::default();
        assert_eq!(recoverer.recover_line("1-1"), Some("1-1".to_string()));
    }

    #[test]
    fn test_no_score_in_lines() {
        let recoverer = HiddenScoreRecoverer::default();
        let lines = ["Fenerbahce", "Galatasaray", "1,85", "3,20"];
        assert_eq!(recoverer.recover(&lines), None);
    }

    #[test]
    fn test_pairs_outside_table_not_recovered() {
        let recoverer = HiddenScoreRecoverer::default();
        assert_eq!(recoverer.recover_line("4-2"), None);
    }

    #[test]
    fn test_first_line_wins() {
        let recoverer = HiddenScoreRecoverer::default();
        let lines = ["Galatasaray", "2 - O", "1-0"];
        assert_eq!(recoverer.recover(&lines), Some("2-0".to_string()));
    }

    #[test]
    fn test_recover_cleans_lines() {
        let recoverer = HiddenScoreRecoverer::default();
        let lines = ["   l   -   O  "];
        assert_eq!(recoverer.recover(&lines), Some("1-0".to_string()));
    }

    #[test]
    fn test_custom_pairs() {
        let recoverer =
            HiddenScoreRecoverer::with_pairs(GlyphTable::default(), &[('4', '2')]).unwrap();
        assert_eq!(recoverer.patterns().len(), 1);
        assert_eq!(recoverer.recover_line("4-z"), Some("4-2".to_string()));
    }

    #[test]
    fn test_unrelated_pair_is_false_positive() {
        // No cross-validation across lines
        let recoverer = HiddenScoreRecoverer::default();
        let lines = ["Hnd. MS (1:0) 1-0 handicap", "3-0"];
        assert_eq!(recoverer.recover(&lines), Some("1-0".to_string()));
    }
}
