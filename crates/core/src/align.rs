//! Positional word and character alignment
//!
//! Alignment is strictly index based: display word *i* is only ever compared
//! with reference word *i* (counting non-whitespace tokens only), and within a
//! word, character *i* only with character *i*. No search for a better match
//! is performed.

use crate::config::{ratio_or_default, DEFAULT_WHOLE_WORD_RATIO};
use crate::diff::{AlignedText, Fragment, HighlightStatistics};
use crate::tokenizers::WhitespaceTokenizer;

/// Result of aligning one word against its reference word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharAlignment {
    pub fragments: Vec<Fragment>,

    /// Whether the threshold rule marked the word as a whole
    pub whole_word: bool,

    /// Number of characters that differ from the reference
    pub diff_count: usize,

    /// Number of character markers emitted
    pub char_marks: usize,
}

/// Compares two words character by character
#[derive(Debug, Clone, Copy)]
pub struct CharacterAligner {
    whole_word_ratio: f64,
}

impl CharacterAligner {
    /// Ratios outside `0.0..=1.0` (NaN included) fall back to the default.
    pub fn new(whole_word_ratio: f64) -> Self {
        Self {
            whole_word_ratio: ratio_or_default(whole_word_ratio),
        }
    }

    /// Align `word` against `reference`.
    ///
    /// Character comparison is exact and case-sensitive. A position past the
    /// end of `reference` always differs. When more than `ratio` of the
    /// characters differ the whole word goes into one word-level marker,
    /// otherwise each differing character gets its own marker.
    pub fn align(&self, word: &str, reference: &str) -> CharAlignment {
        let word_chars: Vec<char> = word.chars().collect();
        let reference_chars: Vec<char> = reference.chars().collect();
        let diff_count = count_differences(&word_chars, &reference_chars);

        if diff_count as f64 > word_chars.len() as f64 * self.whole_word_ratio {
            return CharAlignment {
                fragments: vec![Fragment::WordMismatch(vec![Fragment::text(word)])],
                whole_word: true,
                diff_count,
                char_marks: 0,
            };
        }

        let mut fragments = Vec::new();
        let mut run = String::new();
        let mut char_marks = 0;

        for (i, ch) in word_chars.iter().enumerate() {
            if reference_chars.get(i) == Some(ch) {
                run.push(*ch);
                continue;
            }

            if !run.is_empty() {
                fragments.push(Fragment::Text(std::mem::take(&mut run)));
            }
            fragments.push(Fragment::CharMismatch(*ch));
            char_marks += 1;
        }

        if !run.is_empty() {
            fragments.push(Fragment::Text(run));
        }

        CharAlignment {
            fragments,
            whole_word: false,
            diff_count,
            char_marks,
        }
    }
}

impl Default for CharacterAligner {
    fn default() -> Self {
        Self::new(DEFAULT_WHOLE_WORD_RATIO)
    }
}

/// Number of positions in `word` whose character differs from `reference`
pub fn count_differences(word: &[char], reference: &[char]) -> usize {
    word.iter()
        .enumerate()
        .filter(|(i, ch)| reference.get(*i) != Some(*ch))
        .count()
}

/// Aligns the words of a display text against a reference text
#[derive(Debug, Clone, Copy, Default)]
pub struct WordAligner {
    characters: CharacterAligner,
}

impl WordAligner {
    pub fn new(characters: CharacterAligner) -> Self {
        Self { characters }
    }

    /// Align `display` against `reference`.
    ///
    /// Whitespace in `display` is reproduced as-is and never consumes a
    /// reference position. Words are compared case-insensitively; a word
    /// with no reference counterpart is compared against the empty string.
    pub fn align(&self, display: &str, reference: &str) -> AlignedText {
        if display.is_empty() {
            return AlignedText::default();
        }

        let display_tokens = WhitespaceTokenizer::new().tokenize(display);
        let mut statistics = HighlightStatistics::default();

        if reference.is_empty() {
            statistics.words = display_tokens.iter().filter(|t| !t.is_whitespace()).count();
            return AlignedText {
                fragments: vec![Fragment::text(display)],
                statistics,
            };
        }

        let reference_words = WhitespaceTokenizer::words_only().words(reference);
        let mut fragments = Vec::with_capacity(display_tokens.len());
        let mut ref_index = 0;

        for token in &display_tokens {
            if token.is_whitespace() {
                push_text(&mut fragments, token.text);
                continue;
            }

            statistics.words += 1;
            let reference_word = match reference_words.get(ref_index) {
                Some(word) => *word,
                None => {
                    statistics.missing_reference_words += 1;
                    ""
                }
            };

            if fold_case(token.text) == fold_case(reference_word) {
                statistics.matched_words += 1;
                push_text(&mut fragments, token.text);
            } else {
                let chars = self.characters.align(token.text, reference_word);
                statistics.mismatched_words += 1;
                statistics.char_marks += chars.char_marks;
                if chars.whole_word {
                    statistics.whole_word_marks += 1;
                }
                fragments.push(Fragment::WordMismatch(chars.fragments));
            }

            ref_index += 1;
        }

        AlignedText {
            fragments,
            statistics,
        }
    }
}

/// Simple case fold used for word equality
fn fold_case(word: &str) -> String {
    word.to_lowercase()
}

fn push_text(fragments: &mut Vec<Fragment>, text: &str) {
    if let Some(Fragment::Text(last)) = fragments.last_mut() {
        last.push_str(text);
    } else {
        fragments.push(Fragment::text(text));
    }
}
