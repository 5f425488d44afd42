//! # TransBack Core
//!
//! Tools for judging translation fidelity by round trip: translate a text,
//! translate the result back, and highlight where the back-translation
//! differs from the original.
//!
//! ## Core Concepts
//!
//! - **Tokenizer**: Splits text into whitespace and word runs
//! - **Aligners**: Compare words by position, and characters within a word
//! - **Renderer**: Escapes text and wraps mismatches in markers
//! - **HighlightEngine**: Runs the alignment in both directions
//! - **Event stream**: Ordered progress events of a round trip, with an
//!   incremental parser
//! - **PresentationController**: View state driven by the event stream
//! - **TranslationService**: The model doing translations and reviews
//!
//! ## Example
//!
//! ```rust
//! use transback_core::highlight_differences;
//!
//! let pair = highlight_differences("the cat sat", "the cats sat");
//! assert_eq!(
//!     pair.original.markup,
//!     "the <span class=\"diff-word\">cat</span> sat"
//! );
//! assert_eq!(
//!     pair.back_translated.markup,
//!     "the <span class=\"diff-word\">cat<span class=\"diff-char\">s</span></span> sat"
//! );
//! ```

pub mod align;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod escape;
pub mod logging;
pub mod prompts;
pub mod render;
pub mod round_trip;
pub mod stream;
pub mod tokenizers;
pub mod translator;
pub mod view;

// Re-export main types
pub use config::HighlightConfig;
pub use diff::{Highlight, HighlightPair, HighlightStatistics};
pub use engine::HighlightEngine;
pub use error::{Result, TransbackError};
pub use round_trip::{RoundTrip, RoundTripRequest, RoundTripRunner};
pub use stream::{EventStreamParser, StreamEvent};
pub use translator::{ClientConfig, OpenRouterClient, TranslationService};
pub use view::{Flow, PresentationController, ViewState};

/// Main entry point: highlight an original text and its back-translation
/// against each other, using the default configuration.
///
/// Never fails; empty inputs give empty markup.
pub fn highlight_differences(original: &str, back_translated: &str) -> HighlightPair {
    HighlightEngine::default().highlight_differences(original, back_translated)
}

/// Render `display` with the words that differ from `reference` marked.
pub fn highlight_text(display: &str, reference: &str) -> String {
    HighlightEngine::default().highlight_text(display, reference)
}

/// Render `word` with the characters that differ from `reference_word` marked.
pub fn highlight_characters(word: &str, reference_word: &str) -> String {
    HighlightEngine::default().highlight_characters(word, reference_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_highlight() {
        let pair = highlight_differences("hello world", "hello rust");
        assert!(pair.original.markup.contains("diff-word"));
        assert!(!pair.is_clean());
    }

    #[test]
    fn test_case_only_difference_is_clean() {
        let pair = highlight_differences("Hello World", "HELLO world");
        assert!(pair.is_clean());
        assert_eq!(pair.original.markup, "Hello World");
    }

    #[test]
    fn test_free_functions_match_engine() {
        assert_eq!(
            highlight_text("a  b", "a c"),
            HighlightEngine::default().highlight_text("a  b", "a c")
        );
        assert_eq!(highlight_characters("", "x"), "");
    }
}
