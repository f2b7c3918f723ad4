//! Line classification types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================
// Constants
// ============================================================

/// Lines shorter than this (in characters) are noise
pub const DEFAULT_MIN_LINE_LENGTH: usize = 3;

/// Lowest decimal odds accepted
pub const DEFAULT_ODDS_MIN: f64 = 1.01;

/// Highest decimal odds accepted
pub const DEFAULT_ODDS_MAX: f64 = 100.0;

/// Minimum length of a single-word team name
pub const DEFAULT_SINGLE_WORD_MIN_LENGTH: usize = 4;

/// Share of letters required in a single-word team name
pub const DEFAULT_SINGLE_WORD_LETTER_RATIO: f64 = 0.7;

/// Share of letters required in a multi-word team name (spaces and periods excluded)
pub const DEFAULT_MULTI_WORD_LETTER_RATIO: f64 = 0.6;

/// Longest team name, in words
pub const DEFAULT_MAX_TEAM_WORDS: usize = 5;

/// Interface chrome, market labels and bookmaker brands (matched
/// case-insensitively as substrings). Includes OCR misspellings seen on
/// the bookmaker banners.
pub const UI_DENYLIST: &[&str] = &[
    // Navigation tabs
    "Detay",
    "Kadro",
    "Anlatim",
    "İstatistik",
    "Istatistik",
    "Karşılaştırma",
    "İddaa",
    "Iddaa",
    "Forum",
    "Quick search",
    "mackolik",
    // Bookmakers
    "NESINE",
    "NESTNE",
    "OLEY",
    "MISLI",
    "MMISLI",
    "tuttur",
    "BILYONER",
    // Market labels
    "ALT/UST",
    "SONUC",
    "SANS",
    "HANDICAP",
    "Var",
    "Yok",
    "Evet",
    "Hayir",
    "PEN",
    "Gol",
    "Karşılıklı",
];

/// Single letters used as column labels in the odds grid
pub const COLUMN_LABELS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P',
];

// ============================================================
// Core Data Structures
// ============================================================

/// Category assigned to a single OCR line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Probably a team name
    TeamCandidate,
    /// Decimal odds value
    Odds,
    /// Score shape
    Score,
    /// Everything else
    Noise,
}

impl Category {
    /// Upper-case label
    pub fn label(&self) -> &'static str {
        match self {
            Category::TeamCandidate => "TEAM_CANDIDATE",
            Category::Odds => "ODDS",
            Category::Score => "SCORE",
            Category::Noise => "NOISE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A cleaned line and its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    text: String,
    category: Category,
}

impl ClassifiedLine {
    /// Pair a cleaned line with its category
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    /// Cleaned line text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Assigned category
    pub fn category(&self) -> Category {
        self.category
    }

    /// True when the category is `category`
    pub fn is(&self, category: Category) -> bool {
        self.category == category
    }
}

// ============================================================
// Options
// ============================================================

/// Line classifier options
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOptions {
    /// Minimum line length in characters
    pub min_line_length: usize,
    /// Lowest accepted odds value
    pub odds_min: f64,
    /// Highest accepted odds value
    pub odds_max: f64,
    /// Minimum length of a single-word team name
    pub single_word_min_length: usize,
    /// Share of letters in a single-word team name
    pub single_word_letter_ratio: f64,
    /// Share of letters in a multi-word team name
    pub multi_word_letter_ratio: f64,
    /// Longest team name in words
    pub max_team_words: usize,
    /// Extra denylist terms appended to [`UI_DENYLIST`]
    pub extra_denylist: Vec<String>,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            min_line_length: DEFAULT_MIN_LINE_LENGTH,
            odds_min: DEFAULT_ODDS_MIN,
            odds_max: DEFAULT_ODDS_MAX,
            single_word_min_length: DEFAULT_SINGLE_WORD_MIN_LENGTH,
            single_word_letter_ratio: DEFAULT_SINGLE_WORD_LETTER_RATIO,
            multi_word_letter_ratio: DEFAULT_MULTI_WORD_LETTER_RATIO,
            max_team_words: DEFAULT_MAX_TEAM_WORDS,
            extra_denylist: Vec::new(),
        }
    }
}

impl ClassifierOptions {
    /// Create a new options builder
    pub fn builder() -> ClassifierOptionsBuilder {
        ClassifierOptionsBuilder::default()
    }

    /// Full denylist, built-in terms first
    pub fn denylist(&self) -> Vec<String> {
        UI_DENYLIST
            .iter()
            .map(|term| term.to_string())
            .chain(self.extra_denylist.iter().cloned())
            .filter(|term| !term.trim().is_empty())
            .collect()
    }
}

/// Builder for ClassifierOptions
#[derive(Debug, Default)]
pub struct ClassifierOptionsBuilder {
    options: ClassifierOptions,
}

impl ClassifierOptionsBuilder {
    /// Set the minimum line length
    #[must_use]
    pub fn min_line_length(mut self, length: usize) -> Self {
        self.options.min_line_length = length;
        self
    }

    /// Set the accepted odds range (bounds are swapped if reversed)
    #[must_use]
    pub fn odds_range(mut self, min: f64, max: f64) -> Self {
        self.options.odds_min = min.min(max);
        self.options.odds_max = max.max(min);
        self
    }

    /// Set the single-word team name minimum length
    #[must_use]
    pub fn single_word_min_length(mut self, length: usize) -> Self {
        self.options.single_word_min_length = length;
        self
    }

    /// Set the letter ratios for single and multi-word names (clamped to 0-1)
    #[must_use]
    pub fn letter_ratios(mut self, single_word: f64, multi_word: f64) -> Self {
        self.options.single_word_letter_ratio = single_word.clamp(0.0, 1.0);
        self.options.multi_word_letter_ratio = multi_word.clamp(0.0, 1.0);
        self
    }

    /// Set the longest team name in words (at least 2)
    #[must_use]
    pub fn max_team_words(mut self, words: usize) -> Self {
        self.options.max_team_words = words.max(2);
        self
    }

    /// Append a denylist term
    #[must_use]
    pub fn deny(mut self, term: impl Into<String>) -> Self {
        self.options.extra_denylist.push(term.into());
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> ClassifierOptions {
        self.options
    }
}
