//! Line classifier
//!
//! Pure function of the line and the tables built at construction. Never
//! fails: anything no rule claims is noise.

use tracing::trace;

use super::rules::{default_rules, LineRule};
use super::types::{Category, ClassifiedLine, ClassifierOptions};
use crate::text::clean_line;

/// Classifies OCR lines with an ordered rule chain
#[derive(Debug)]
pub struct LineClassifier {
    rules: Vec<Box<dyn LineRule>>,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(&ClassifierOptions::default())
    }
}

impl LineClassifier {
    /// Build the default rule chain from options
    pub fn new(options: &ClassifierOptions) -> Self {
        Self {
            rules: default_rules(options),
        }
    }

    /// Build a classifier from an explicit rule chain
    pub fn with_rules(rules: Vec<Box<dyn LineRule>>) -> Self {
        Self { rules }
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Category of an already cleaned line
    pub fn classify(&self, line: &str) -> Category {
        self.decide(line).0
    }

    /// Category and the name of the rule that decided it (`None` for the default)
    pub fn decide(&self, line: &str) -> (Category, Option<&'static str>) {
        for rule in &self.rules {
            if let Some(category) = rule.apply(line) {
                trace!(line, rule = rule.name(), %category, "classified");
                return (category, Some(rule.name()));
            }
        }
        trace!(line, category = %Category::Noise, "no rule matched");
        (Category::Noise, None)
    }

    /// Clean and classify every raw line, skipping lines that clean to nothing
    pub fn classify_all<S: AsRef<str>>(&self, raw_lines: &[S]) -> Vec<ClassifiedLine> {
        raw_lines
            .iter()
            .map(|raw| clean_line(raw.as_ref()))
            .filter(|line| !line.is_empty())
            .map(|line| {
                let category = self.classify(&line);
                ClassifiedLine::new(line, category)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lines_are_noise() {
        let classifier = LineClassifier::default();
        assert_eq!(classifier.classify(""), Category::Noise);
        assert_eq!(classifier.classify("MS"), Category::Noise);
        assert_eq!(classifier.decide("1X").1, Some("too-short"));
    }

    #[test]
    fn test_odds_lines() {
        let classifier = LineClassifier::default();
        assert_eq!(classifier.classify("1,85"), Category::Odds);
        assert_eq!(classifier.classify("3.20"), Category::Odds);
        assert_eq!(classifier.classify("12,50"), Category::Odds);
        assert_eq!(classifier.classify("1,00"), Category::Noise);
        assert_eq!(classifier.decide("0.99").1, Some("numeric"));
    }

    #[test]
    fn test_score_lines() {
        let classifier = LineClassifier::default();
        assert_eq!(classifier.classify("1-0"), Category::Score);
        assert_eq!(classifier.classify("(2-1)"), Category::Score);
        assert_eq!(classifier.classify("HT 0-0"), Category::Score);
    }

    #[test]
    fn test_team_line_with_embedded_score() {
        let classifier = LineClassifier::default();
        assert_eq!(
            classifier.classify("Besiktas HT 1-0 Trabzonspor"),
            Category::TeamCandidate
        );
        assert_eq!(classifier.classify("FT 2-1 Besiktas"), Category::TeamCandidate);
    }

    #[test]
    fn test_numeric_lines_are_noise() {
        let classifier = LineClassifier::default();
        assert_eq!(classifier.classify("45%"), Category::Noise);
        assert_eq!(classifier.classify("1.5, 2.5"), Category::Noise);
    }

    #[test]
    fn test_denylisted_lines_are_noise() {
        let classifier = LineClassifier::default();
        assert_eq!(classifier.classify("NESINE"), Category::Noise);
        assert_eq!(classifier.classify("Nesine.com"), Category::Noise);
        assert_eq!(classifier.classify("Quick search"), Category::Noise);
        assert_eq!(classifier.decide("ALT/UST 2.5").1, Some("denylist"));
    }

    #[test]
    fn test_extra_denylist_terms() {
        let options = ClassifierOptions::builder().deny("Canli").build();
        let classifier = LineClassifier::new(&options);
        assert_eq!(classifier.classify("Canli Skor"), Category::Noise);
        assert_eq!(
            LineClassifier::default().classify("Canli Skor"),
            Category::TeamCandidate
        );
    }

    #[test]
    fn test_team_candidates() {
        let classifier = LineClassifier::default();
        assert_eq!(classifier.classify("Fenerbahce"), Category::TeamCandidate);
        assert_eq!(classifier.classify("Galatasaray"), Category::TeamCandidate);
        assert_eq!(classifier.classify("Real Madrid"), Category::TeamCandidate);
        assert_eq!(classifier.classify("Bay"), Category::Noise);
    }

    #[test]
    fn test_symbols_without_letters_are_noise() {
        let classifier = LineClassifier::default();
        assert_eq!(classifier.decide("+++ ***").1, Some("no-letters"));
    }

    #[test]
    fn test_default_is_noise() {
        let classifier = LineClassifier::default();
        assert_eq!(classifier.decide("x1 y2 z3 w4 v5 u6"), (Category::Noise, None));
    }

    #[test]
    fn test_classify_all_cleans_and_skips_blank() {
        let classifier = LineClassifier::default();
        let lines = classifier.classify_all(&["  Real   Madrid ", "   ", "1,85"]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "Real Madrid");
        assert!(lines[0].is(Category::TeamCandidate));
        assert_eq!(lines[1].category(), Category::Odds);
    }

    #[test]
    fn test_custom_rule_chain() {
        use crate::classify::rules::NoLetters;
        let classifier = LineClassifier::with_rules(vec![Box::new(NoLetters)]);
        assert_eq!(classifier.rule_names(), vec!["no-letters"]);
        assert_eq!(classifier.classify("Fenerbahce"), Category::Noise);
    }
}
