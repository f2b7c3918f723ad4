//! Line Classification module
//!
//! Sorts cleaned OCR lines into team-name candidates, odds values, scores and
//! noise.
//!
//! # Rule order
//!
//! 1. Shorter than 3 characters: noise
//! 2. `\d{1,2}[,.]\d{2}` within `[1.01, 100.0]`: odds
//! 3. Canonical score shape: score
//! 4. Digits and punctuation only: noise
//! 5. Interface or bookmaker denylist term: noise
//! 6. No letters: noise
//! 7. Bare `A`-`P` column label: noise
//! 8. Mostly letters, 1 to 5 words: team candidate
//!
//! Anything left over is noise.
//!
//! # Example
//!
//! ```rust
//! use oddsboard::{Category, LineClassifier};
//!
//! let classifier = LineClassifier::default();
//! assert_eq!(classifier.classify("Fenerbahce"), Category::TeamCandidate);
//! assert_eq!(classifier.classify("1,85"), Category::Odds);
//! assert_eq!(classifier.classify("NESINE"), Category::Noise);
//! ```

mod classifier;
pub mod rules;
mod types;

// Re-export public API
pub use classifier::LineClassifier;
pub use rules::LineRule;
pub use types::{
    Category, ClassifiedLine, ClassifierOptions, ClassifierOptionsBuilder, COLUMN_LABELS,
    UI_DENYLIST,
};
