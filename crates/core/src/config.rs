//! Configuration for the highlight engine

use tracing::warn;

/// Default CSS class of the word-level mismatch marker
pub const DEFAULT_WORD_CLASS: &str = "diff-word";

/// Default CSS class of the character-level mismatch marker
pub const DEFAULT_CHAR_CLASS: &str = "diff-char";

/// Share of differing characters above which a word is marked as a whole
pub const DEFAULT_WHOLE_WORD_RATIO: f64 = 0.5;

/// Configuration for highlight computation
///
/// Class names always match `[A-Za-z0-9_-]+` and the ratio lies in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightConfig {
    /// Class attribute of the word-level marker
    word_class: String,

    /// Class attribute of the character-level marker
    char_class: String,

    /// A word is marked whole when `differing chars > len * ratio`
    whole_word_ratio: f64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            word_class: DEFAULT_WORD_CLASS.to_string(),
            char_class: DEFAULT_CHAR_CLASS.to_string(),
            whole_word_ratio: DEFAULT_WHOLE_WORD_RATIO,
        }
    }

    pub fn word_class(&self) -> &str {
        &self.word_class
    }

    pub fn char_class(&self) -> &str {
        &self.char_class
    }

    pub fn whole_word_ratio(&self) -> f64 {
        self.whole_word_ratio
    }

    /// Set the word-level marker class.
    ///
    /// Names outside `[A-Za-z0-9_-]` are rejected and the default is kept.
    pub fn with_word_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if is_valid_class(&class) {
            self.word_class = class;
        } else {
            warn!(class = %class, "ignoring invalid word marker class");
        }
        self
    }

    /// Set the character-level marker class.
    ///
    /// Names outside `[A-Za-z0-9_-]` are rejected and the default is kept.
    pub fn with_char_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if is_valid_class(&class) {
            self.char_class = class;
        } else {
            warn!(class = %class, "ignoring invalid char marker class");
        }
        self
    }

    /// Set the whole-word threshold ratio.
    ///
    /// Values outside `0.0..=1.0` (and NaN) are rejected.
    pub fn with_whole_word_ratio(mut self, ratio: f64) -> Self {
        if is_valid_ratio(ratio) {
            self.whole_word_ratio = ratio;
        } else {
            warn!(ratio, "ignoring out-of-range whole word ratio");
        }
        self
    }
}

/// `class` when it is a usable marker class, `fallback` otherwise
pub(crate) fn class_or(class: String, fallback: &str) -> String {
    if is_valid_class(&class) {
        class
    } else {
        warn!(class = %class, fallback, "replacing invalid marker class");
        fallback.to_string()
    }
}

/// `ratio` when it lies in `0.0..=1.0`, the default otherwise
pub(crate) fn ratio_or_default(ratio: f64) -> f64 {
    if is_valid_ratio(ratio) {
        ratio
    } else {
        warn!(ratio, "replacing out-of-range whole word ratio");
        DEFAULT_WHOLE_WORD_RATIO
    }
}

fn is_valid_ratio(ratio: f64) -> bool {
    (0.0..=1.0).contains(&ratio)
}

fn is_valid_class(class: &str) -> bool {
    !class.is_empty()
        && class
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
