//! Score pattern types

use regex::Regex;

use crate::glyph::{GlyphTable, CANONICAL_SEPARATOR};

// ============================================================
// Constants
// ============================================================

/// Score shapes searched for under glyph confusion, in priority order.
///
/// Only these pairs are recoverable from misread text; a clean `4-2` is
/// still found by the canonical shapes in the classifier but not here.
pub const DEFAULT_SCORE_PAIRS: [(char, char); 5] =
    [('1', '0'), ('1', '1'), ('2', '0'), ('2', '1'), ('3', '0')];

/// Canonical `digit - digit` span extracted after normalization
pub const CANONICAL_SCORE_PATTERN: &str = r"[0-9]\s*-\s*[0-9]";

/// Line shapes that read as a score without any glyph repair
pub const CANONICAL_SCORE_SHAPES: [(&str, &str); 5] = [
    ("dash", r"^[0-9]+\s*-\s*[0-9]+$"),
    ("parenthesised", r"^\([0-9]+-[0-9]+\)$"),
    ("colon", r"^[0-9]+:[0-9]+$"),
    ("half-time", r"^HT\s*[0-9]+-[0-9]+$"),
    ("full-time", r"^FT\s*[0-9]+-[0-9]+$"),
];

// ============================================================
// Score Pattern
// ============================================================

/// A named line predicate describing one score shape
#[derive(Debug, Clone)]
pub struct ScorePattern {
    name: String,
    regex: Regex,
}

impl ScorePattern {
    /// Compile a pattern from a regular expression
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            regex: Regex::new(pattern)?,
        })
    }

    /// Pattern for `lhs-rhs` where each digit and the separator may appear
    /// as any of their confusable glyphs
    pub fn confusable(table: &GlyphTable, lhs: char, rhs: char) -> Result<Self, regex::Error> {
        let pattern = format!(
            r"{}\s*{}\s*{}",
            table.regex_class(lhs),
            table.regex_class(CANONICAL_SEPARATOR),
            table.regex_class(rhs),
        );
        Self::new(format!("{}-{}", lhs, rhs), &pattern)
    }

    /// Pattern name, e.g. `1-0`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the pattern occurs anywhere in `line`
    pub fn test(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// First matching span in `line`
    pub fn find<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex.find(line).map(|m| m.as_str())
    }
}

/// Ordered set of canonical score shapes
#[derive(Debug, Clone)]
pub struct ScoreShapes {
    patterns: Vec<ScorePattern>,
}

impl Default for ScoreShapes {
    fn default() -> Self {
        let patterns = CANONICAL_SCORE_SHAPES
            .iter()
            .map(|(name, pattern)| {
                ScorePattern::new(*name, pattern).expect("canonical score shapes are valid regex")
            })
            .collect();
        Self { patterns }
    }
}

impl ScoreShapes {
    /// Name of the first shape matching `line`
    pub fn matching(&self, line: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.test(line))
            .map(ScorePattern::name)
    }

    /// True when `line` reads as a score
    pub fn is_score(&self, line: &str) -> bool {
        self.matching(line).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusable_pattern_name() {
        let table = GlyphTable::default();
        let pattern = ScorePattern::confusable(&table, '2', '1').unwrap();
        assert_eq!(pattern.name(), "2-1");
        assert!(pattern.test("2 - l"));
        assert!(pattern.test("z\u{2013}I"));
        assert!(!pattern.test("2 - 5"));
    }

    #[test]
    fn test_confusable_pattern_find() {
        let table = GlyphTable::default();
        let pattern = ScorePattern::confusable(&table, '1', '0').unwrap();
        assert_eq!(pattern.find("MS I - O"), Some("I - O"));
    }

    #[test]
    fn test_score_shapes() {
        let shapes = ScoreShapes::default();
        assert_eq!(shapes.matching("1-0"), Some("dash"));
        assert_eq!(shapes.matching("3 - 2"), Some("dash"));
        assert_eq!(shapes.matching("(1-0)"), Some("parenthesised"));
        assert_eq!(shapes.matching("2:1"), Some("colon"));
        assert_eq!(shapes.matching("HT 0-0"), Some("half-time"));
        assert_eq!(shapes.matching("FT2-1"), Some("full-time"));
        assert!(!shapes.is_score("1,85"));
        assert!(!shapes.is_score("Fenerbahce"));
    }

    #[test]
    fn test_score_shapes_are_whole_line() {
        let shapes = ScoreShapes::default();
        assert!(!shapes.is_score("FT 2-1 Besiktas"));
        assert!(!shapes.is_score("Besiktas HT 1-0 Trabzonspor"));
        assert!(!shapes.is_score("ht 1-0"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(ScorePattern::new("broken", "([0-9]").is_err());
    }
}
