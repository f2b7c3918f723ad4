//! Confusable glyph normalization
//!
//! OCR engines regularly read the digits of a score as look-alike letters or
//! symbols (`I-O` for `1-0`, `2 — l` for `2-1`). [`GlyphTable`] holds the
//! many-to-one substitution table that maps those glyphs back to digits and a
//! single `-` separator.
//!
//! The substitution is lossy. It must only be applied to lines that already
//! look like a score; running it over team names would turn `Olimpia` into
//! `011mp1a`.

use std::collections::BTreeMap;

/// Canonical score separator
pub const CANONICAL_SEPARATOR: char = '-';

/// Glyphs read in place of `1`
const ONE_GLYPHS: &[char] = &['I', 'l', '|', 'i'];

/// Glyphs read in place of `0`
const ZERO_GLYPHS: &[char] = &['O', 'o', 'Q'];

/// Glyphs read in place of `2`
const TWO_GLYPHS: &[char] = &['Z', 'z'];

/// Glyphs read in place of `3`
const THREE_GLYPHS: &[char] = &['Ɛ'];

/// Dash, minus and hyphen variants read in place of the separator
const SEPARATOR_GLYPHS: &[char] = &['\u{2212}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2010}'];

/// Immutable glyph substitution table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    substitutions: BTreeMap<char, char>,
}

impl Default for GlyphTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert_all('1', ONE_GLYPHS);
        table.insert_all('0', ZERO_GLYPHS);
        table.insert_all('2', TWO_GLYPHS);
        table.insert_all('3', THREE_GLYPHS);
        table.insert_all(CANONICAL_SEPARATOR, SEPARATOR_GLYPHS);
        table
    }
}

impl GlyphTable {
    /// Table with no substitutions
    pub fn empty() -> Self {
        Self {
            substitutions: BTreeMap::new(),
        }
    }

    /// Add substitutions for `canonical`, returning the extended table
    #[must_use]
    pub fn with_glyphs(mut self, canonical: char, glyphs: &[char]) -> Self {
        self.insert_all(canonical, glyphs);
        self
    }

    fn insert_all(&mut self, canonical: char, glyphs: &[char]) {
        for &glyph in glyphs {
            if glyph != canonical {
                self.substitutions.insert(glyph, canonical);
            }
        }
    }

    /// Canonical replacement for a single glyph, if it is confusable
    pub fn canonical(&self, glyph: char) -> Option<char> {
        self.substitutions.get(&glyph).copied()
    }

    /// Rewrite every confusable glyph in `span` to its canonical form
    pub fn normalize(&self, span: &str) -> String {
        span.chars()
            .map(|c| self.canonical(c).unwrap_or(c))
            .collect()
    }

    /// All glyphs that normalize to `canonical`, canonical first
    pub fn glyphs_for(&self, canonical: char) -> Vec<char> {
        let mut glyphs = vec![canonical];
        glyphs.extend(
            self.substitutions
                .iter()
                .filter(|(_, &target)| target == canonical)
                .map(|(&glyph, _)| glyph),
        );
        glyphs
    }

    /// Regex character class matching `canonical` or any of its look-alikes
    pub fn regex_class(&self, canonical: char) -> String {
        let mut class = String::from("[");
        for glyph in self.glyphs_for(canonical) {
            class.push_str(&regex::escape(&glyph.to_string()));
        }
        class.push(']');
        class
    }

    /// Number of substitution entries
    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    /// True when the table has no substitutions
    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }
}
