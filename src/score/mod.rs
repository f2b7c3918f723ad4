//! Score detection module
//!
//! # Features
//!
//! - Canonical score shapes (`1-0`, `(1-0)`, `1:0`, `HT 1-0`) used by the line classifier
//! - Hidden score recovery under OCR glyph confusion (`I-O`, `2 - l`, `Z—O`)
//!
//! # Example
//!
//! ```rust
//! use oddsboard::HiddenScoreRecoverer;
//!
//! let recoverer = HiddenScoreRecoverer::default();
//! let lines = ["Fenerbahce", "Galatasaray", "I - O"];
//! assert_eq!(recoverer.recover(&lines).as_deref(), Some("1-0"));
//! ```

mod recover;
mod types;

// Re-export public API
pub use recover::HiddenScoreRecoverer;
pub use types::{
    ScorePattern, ScoreShapes, CANONICAL_SCORE_PATTERN, CANONICAL_SCORE_SHAPES,
    DEFAULT_SCORE_PAIRS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern_order() {
        let recoverer = HiddenScoreRecoverer::default();
        let names: Vec<&str> = recoverer.patterns().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["1-0", "1-1", "2-0", "2-1", "3-0"]);
    }

    #[test]
    fn test_shapes_and_recovery_agree_on_clean_scores() {
        let shapes = ScoreShapes::default();
        let recoverer = HiddenScoreRecoverer::default();
        for score in ["1-0", "1-1", "2-0", "2-1", "3-0"] {
            assert!(shapes.is_score(score));
            assert_eq!(recoverer.recover_line(score).as_deref(), Some(score));
        }
    }
}
