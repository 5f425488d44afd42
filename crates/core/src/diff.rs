//! Highlight result types

use serde::Serialize;
use std::fmt;

/// A piece of aligned output before rendering
///
/// Text held here is never escaped; escaping happens when the fragment is
/// rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Text that is emitted without a marker
    Text(String),
    /// One character that differs from its reference counterpart
    CharMismatch(char),
    /// A word-level mismatch marker around nested fragments
    WordMismatch(Vec<Fragment>),
}

impl Fragment {
    pub fn text(text: impl Into<String>) -> Self {
        Fragment::Text(text.into())
    }

    /// Append the unescaped content of this fragment to `out`
    pub fn push_plain(&self, out: &mut String) {
        match self {
            Fragment::Text(text) => out.push_str(text),
            Fragment::CharMismatch(ch) => out.push(*ch),
            Fragment::WordMismatch(children) => {
                for child in children {
                    child.push_plain(out);
                }
            }
        }
    }

    /// Unescaped content of a fragment sequence, markers removed
    pub fn plain_text(fragments: &[Fragment]) -> String {
        let mut out = String::new();
        for fragment in fragments {
            fragment.push_plain(&mut out);
        }
        out
    }
}

/// Counters collected while aligning one direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HighlightStatistics {
    /// Non-whitespace tokens in the display text
    pub words: usize,

    /// Words equal to their reference counterpart (ignoring case)
    pub matched_words: usize,

    /// Words that differ from their reference counterpart
    pub mismatched_words: usize,

    /// Mismatched words marked as a whole by the character threshold
    pub whole_word_marks: usize,

    /// Individual character markers emitted
    pub char_marks: usize,

    /// Display words aligned past the end of the reference word list
    pub missing_reference_words: usize,
}

impl HighlightStatistics {
    /// Share of display words that were marked (0.0 to 1.0)
    pub fn mismatch_ratio(&self) -> f64 {
        if self.words == 0 {
            0.0
        } else {
            self.mismatched_words as f64 / self.words as f64
        }
    }

    /// Whether no marker was emitted
    pub fn is_clean(&self) -> bool {
        self.mismatched_words == 0
    }
}

/// Aligned output of one direction, not yet rendered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedText {
    pub fragments: Vec<Fragment>,
    pub statistics: HighlightStatistics,
}

impl AlignedText {
    pub fn plain_text(&self) -> String {
        Fragment::plain_text(&self.fragments)
    }
}

/// Rendered markup for one direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    /// Escaped markup with mismatch markers
    pub markup: String,

    pub statistics: HighlightStatistics,
}

/// Both directions of a back-translation comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightPair {
    /// The original text, marked against the back-translation
    pub original: Highlight,

    /// The back-translation, marked against the original text
    pub back_translated: Highlight,
}

impl HighlightPair {
    /// Get a summary of both directions
    pub fn summary(&self) -> String {
        let original = &self.original.statistics;
        let back = &self.back_translated.statistics;
        format!(
            "Original: {}/{} words marked ({:.1}%). Back-translation: {}/{} words marked ({:.1}%).",
            original.mismatched_words,
            original.words,
            original.mismatch_ratio() * 100.0,
            back.mismatched_words,
            back.words,
            back.mismatch_ratio() * 100.0,
        )
    }

    /// Whether neither direction carries a marker
    pub fn is_clean(&self) -> bool {
        self.original.statistics.is_clean() && self.back_translated.statistics.is_clean()
    }
}

impl fmt::Display for HighlightPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Back-translation Highlight ===")?;
        writeln!(f, "{}", self.summary())?;
        writeln!(f, "\nOriginal:\n{}", self.original.markup)?;
        writeln!(f, "\nBack-translated:\n{}", self.back_translated.markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_markers() {
        let fragments = vec![
            Fragment::text("a "),
            Fragment::WordMismatch(vec![
                Fragment::text("ca"),
                Fragment::CharMismatch('<'),
            ]),
        ];

        assert_eq!(Fragment::plain_text(&fragments), "a ca<");
    }

    #[test]
    fn test_mismatch_ratio() {
        let stats = HighlightStatistics {
            words: 4,
            matched_words: 3,
            mismatched_words: 1,
            ..Default::default()
        };

        assert_eq!(stats.mismatch_ratio(), 0.25);
        assert!(!stats.is_clean());
        assert_eq!(HighlightStatistics::default().mismatch_ratio(), 0.0);
    }

    #[test]
    fn test_pair_summary() {
        let mut pair = HighlightPair::default();
        pair.original.statistics.words = 2;
        pair.original.statistics.mismatched_words = 1;

        assert!(!pair.is_clean());
        assert!(pair.summary().starts_with("Original: 1/2 words marked (50.0%)."));
    }
}
