//! Highlight engine that ties alignment and rendering together

use tracing::debug;

use crate::align::{CharacterAligner, WordAligner};
use crate::config::HighlightConfig;
use crate::diff::{AlignedText, Highlight, HighlightPair};
use crate::render::HtmlRenderer;

/// The main highlight engine
///
/// Stateless apart from its configuration; one engine can serve any number
/// of calls, from any number of threads.
#[derive(Debug, Clone)]
pub struct HighlightEngine {
    config: HighlightConfig,
    words: WordAligner,
    characters: CharacterAligner,
    renderer: HtmlRenderer,
}

impl HighlightEngine {
    /// Create a new highlight engine with the given configuration
    pub fn new(config: HighlightConfig) -> Self {
        let characters = CharacterAligner::new(config.whole_word_ratio());
        Self {
            words: WordAligner::new(characters),
            characters,
            renderer: HtmlRenderer::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Mark the characters of `word` that differ from `reference_word`.
    pub fn highlight_characters(&self, word: &str, reference_word: &str) -> String {
        let alignment = self.characters.align(word, reference_word);
        self.renderer.render(&alignment.fragments)
    }

    /// Align `display` against `reference` without rendering.
    pub fn align_text(&self, display: &str, reference: &str) -> AlignedText {
        self.words.align(display, reference)
    }

    /// Render `display` with every word that differs from its positional
    /// counterpart in `reference` marked.
    pub fn highlight_text(&self, display: &str, reference: &str) -> String {
        self.highlight(display, reference).markup
    }

    /// Like [`highlight_text`](Self::highlight_text), keeping the statistics.
    pub fn highlight(&self, display: &str, reference: &str) -> Highlight {
        let aligned = self.align_text(display, reference);
        Highlight {
            markup: self.renderer.render(&aligned.fragments),
            statistics: aligned.statistics,
        }
    }

    /// Compare an original text with its back-translation in both directions.
    ///
    /// The two directions are computed independently and need not mark the
    /// same positions.
    pub fn highlight_differences(&self, original: &str, back_translated: &str) -> HighlightPair {
        let pair = HighlightPair {
            original: self.highlight(original, back_translated),
            back_translated: self.highlight(back_translated, original),
        };

        debug!(
            original_words = pair.original.statistics.words,
            original_marked = pair.original.statistics.mismatched_words,
            back_words = pair.back_translated.statistics.words,
            back_marked = pair.back_translated.statistics.mismatched_words,
            "highlighted back-translation differences"
        );

        pair
    }
}

impl Default for HighlightEngine {
    fn default() -> Self {
        Self::new(HighlightConfig::default())
    }
}
