//! Classification rules
//!
//! Each rule inspects one cleaned line and either decides its category or
//! passes. The classifier evaluates rules in a fixed order and the first
//! decision wins.

use regex::Regex;
use std::fmt;

use super::types::{Category, ClassifierOptions, COLUMN_LABELS};
use crate::score::ScoreShapes;
use crate::text::{has_letter, letter_count};

/// `1,85` / `12.50`
const ODDS_SHAPE: &str = r"^[0-9]{1,2}[,.][0-9]{2}$";

/// Digits, separators and percent signs only
const NUMERIC_SHAPE: &str = r"^[0-9\-\s:.,%]+$";

/// A single classification rule
pub trait LineRule: fmt::Debug + Send + Sync {
    /// Rule name used in logs
    fn name(&self) -> &'static str;

    /// Category for `line`, or `None` to let the next rule decide
    fn apply(&self, line: &str) -> Option<Category>;
}

/// Lines shorter than the minimum length
#[derive(Debug)]
pub struct TooShort {
    pub min_length: usize,
}

impl LineRule for TooShort {
    fn name(&self) -> &'static str {
        "too-short"
    }

    fn apply(&self, line: &str) -> Option<Category> {
        (line.chars().count() < self.min_length).then_some(Category::Noise)
    }
}

/// Decimal odds within the accepted range
#[derive(Debug)]
pub struct OddsValue {
    shape: Regex,
    min: f64,
    max: f64,
}

impl OddsValue {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            shape: Regex::new(ODDS_SHAPE).expect("odds shape is a valid regex"),
            min,
            max,
        }
    }

    /// Parsed value when `line` is a valid odds value
    pub fn value(&self, line: &str) -> Option<f64> {
        if !self.shape.is_match(line) {
            return None;
        }
        let value: f64 = line.replace(',', ".").parse().ok()?;
        (self.min..=self.max).contains(&value).then_some(value)
    }
}

impl LineRule for OddsValue {
    fn name(&self) -> &'static str {
        "odds"
    }

    fn apply(&self, line: &str) -> Option<Category> {
        self.value(line).map(|_| Category::Odds)
    }
}

/// Canonical score shapes
#[derive(Debug, Default)]
pub struct ScoreShape {
    shapes: ScoreShapes,
}

impl LineRule for ScoreShape {
    fn name(&self) -> &'static str {
        "score"
    }

    fn apply(&self, line: &str) -> Option<Category> {
        self.shapes.is_score(line).then_some(Category::Score)
    }
}

/// Digits and punctuation with no letters
#[derive(Debug)]
pub struct NumericOnly {
    shape: Regex,
}

impl Default for NumericOnly {
    fn default() -> Self {
        Self {
            shape: Regex::new(NUMERIC_SHAPE).expect("numeric shape is a valid regex"),
        }
    }
}

impl LineRule for NumericOnly {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn apply(&self, line: &str) -> Option<Category> {
        self.shape.is_match(line).then_some(Category::Noise)
    }
}

/// Interface chrome and bookmaker brands
#[derive(Debug)]
pub struct Denylist {
    terms: Vec<String>,
}

impl Denylist {
    pub fn new(terms: Vec<String>) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_uppercase()).collect(),
        }
    }

    /// First denylisted term contained in `line`
    pub fn matching(&self, line: &str) -> Option<&str> {
        let upper = line.to_uppercase();
        self.terms
            .iter()
            .find(|term| upper.contains(term.as_str()))
            .map(String::as_str)
    }
}

impl LineRule for Denylist {
    fn name(&self) -> &'static str {
        "denylist"
    }

    fn apply(&self, line: &str) -> Option<Category> {
        self.matching(line).map(|_| Category::Noise)
    }
}

/// Lines without any letter
#[derive(Debug)]
pub struct NoLetters;

impl LineRule for NoLetters {
    fn name(&self) -> &'static str {
        "no-letters"
    }

    fn apply(&self, line: &str) -> Option<Category> {
        (!has_letter(line)).then_some(Category::Noise)
    }
}

/// Bare grid column labels (`A` to `P`)
#[derive(Debug)]
pub struct ColumnLabel;

impl LineRule for ColumnLabel {
    fn name(&self) -> &'static str {
        "column-label"
    }

    fn apply(&self, line: &str) -> Option<Category> {
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if COLUMN_LABELS.contains(&c.to_ascii_uppercase()) => {
                Some(Category::Noise)
            }
            _ => None,
        }
    }
}

/// Mostly-letter lines of one to a few words
#[derive(Debug)]
pub struct TeamName {
    single_word_min_length: usize,
    single_word_letter_ratio: f64,
    multi_word_letter_ratio: f64,
    max_words: usize,
}

impl TeamName {
    pub fn new(options: &ClassifierOptions) -> Self {
        Self {
            single_word_min_length: options.single_word_min_length,
            single_word_letter_ratio: options.single_word_letter_ratio,
            multi_word_letter_ratio: options.multi_word_letter_ratio,
            max_words: options.max_team_words,
        }
    }

    fn is_team_name(&self, line: &str) -> bool {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.len() {
            1 => {
                let word = words[0];
                let length = word.chars().count();
                length >= self.single_word_min_length
                    && letter_count(word) as f64 >= length as f64 * self.single_word_letter_ratio
            }
            n if (2..=self.max_words).contains(&n) => {
                let counted = line.chars().filter(|&c| c != ' ' && c != '.').count();
                letter_count(line) as f64 >= counted as f64 * self.multi_word_letter_ratio
            }
            _ => false,
        }
    }
}

impl LineRule for TeamName {
    fn name(&self) -> &'static str {
        "team-name"
    }

    fn apply(&self, line: &str) -> Option<Category> {
        self.is_team_name(line).then_some(Category::TeamCandidate)
    }
}

/// Rule chain in evaluation order
pub fn default_rules(options: &ClassifierOptions) -> Vec<Box<dyn LineRule>> {
    vec![
        Box::new(TooShort {
            min_length: options.min_line_length,
        }),
        Box::new(OddsValue::new(options.odds_min, options.odds_max)),
        Box::new(ScoreShape::default()),
        Box::new(NumericOnly::default()),
        Box::new(Denylist::new(options.denylist())),
        Box::new(NoLetters),
        Box::new(ColumnLabel),
        Box::new(TeamName::new(options)),
    ]
}
