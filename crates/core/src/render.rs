//! Markup rendering of aligned fragments

use crate::config::{class_or, HighlightConfig, DEFAULT_CHAR_CLASS, DEFAULT_WORD_CLASS};
use crate::diff::Fragment;
use crate::escape::{push_escaped, push_escaped_char};

/// Renders fragments as HTML `<span>` markers around escaped text
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    word_class: String,
    char_class: String,
}

impl HtmlRenderer {
    /// Class names outside `[A-Za-z0-9_-]` are replaced by the defaults.
    pub fn new(word_class: impl Into<String>, char_class: impl Into<String>) -> Self {
        Self {
            word_class: class_or(word_class.into(), DEFAULT_WORD_CLASS),
            char_class: class_or(char_class.into(), DEFAULT_CHAR_CLASS),
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::new(config.word_class(), config.char_class())
    }

    /// Render a fragment sequence into one markup string
    pub fn render(&self, fragments: &[Fragment]) -> String {
        let mut out = String::new();
        for fragment in fragments {
            self.render_into(&mut out, fragment);
        }
        out
    }

    fn render_into(&self, out: &mut String, fragment: &Fragment) {
        match fragment {
            Fragment::Text(text) => push_escaped(out, text),
            Fragment::CharMismatch(ch) => {
                self.open(out, &self.char_class);
                push_escaped_char(out, *ch);
                out.push_str("</span>");
            }
            Fragment::WordMismatch(children) => {
                self.open(out, &self.word_class);
                for child in children {
                    self.render_into(out, child);
                }
                out.push_str("</span>");
            }
        }
    }

    fn open(&self, out: &mut String, class: &str) {
        out.push_str("<span class=\"");
        out.push_str(class);
        out.push_str("\">");
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::from_config(&HighlightConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_escaped() {
        let renderer = HtmlRenderer::default();
        let markup = renderer.render(&[Fragment::text("a < b & 'c'")]);
        assert_eq!(markup, "a &lt; b &amp; &#039;c&#039;");
    }

    #[test]
    fn test_nested_markers() {
        let renderer = HtmlRenderer::default();
        let markup = renderer.render(&[
            Fragment::text("x "),
            Fragment::WordMismatch(vec![Fragment::text("ca"), Fragment::CharMismatch('>')]),
        ]);

        assert_eq!(
            markup,
            "x <span class=\"diff-word\">ca<span class=\"diff-char\">&gt;</span></span>"
        );
    }

    #[test]
    fn test_custom_classes() {
        let renderer = HtmlRenderer::new("w", "c");
        let markup = renderer.render(&[Fragment::WordMismatch(vec![Fragment::CharMismatch('z')])]);
        assert_eq!(markup, "<span class=\"w\"><span class=\"c\">z</span></span>");
    }

    #[test]
    fn test_invalid_classes_fall_back() {
        let renderer = HtmlRenderer::new("x\"><script>", "");
        let markup = renderer.render(&[Fragment::WordMismatch(vec![Fragment::CharMismatch('<')])]);
        assert_eq!(
            markup,
            "<span class=\"diff-word\"><span class=\"diff-char\">&lt;</span></span>"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(HtmlRenderer::default().render(&[]), "");
    }
}
