//! Prompt templates for the translation model
//!
//! Templates use `{name}` placeholders. A prompt directory may override any of
//! the built-in templates with `translate_system.txt`, `compare_system.txt` and
//! `compare_user.txt`.

use std::path::Path;
use tracing::debug;

use crate::error::Result;

const TRANSLATE_SYSTEM: &str = "You are a professional translator. Translate the user's text \
from {source} to {target}. Preserve meaning, tone and formatting, including line breaks. \
Reply with the translation only, without notes or explanations.";

const COMPARE_SYSTEM: &str = "You compare two texts written in {language}: an original and a \
back-translation of it. Point out every difference in meaning, omission or addition, ordered \
by importance, and say whether the overall meaning was preserved. Answer in {language}.";

const COMPARE_USER: &str = "Original:\n{original}\n\nBack-translation:\n{back_translated}";

/// A prompt with `{name}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitute every `{name}` with its value; unknown placeholders stay as-is.
    ///
    /// Substitution is single pass, so values containing braces are never
    /// expanded again.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let replaced = after.find('}').and_then(|close| {
                let name = &after[..close];
                vars.iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (close, *value))
            });

            match replaced {
                Some((close, value)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// The three prompts used by a round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    /// System prompt for translation; `{source}`, `{target}`
    pub translate_system: PromptTemplate,

    /// System prompt for the meaning comparison; `{language}`
    pub compare_system: PromptTemplate,

    /// User prompt for the meaning comparison; `{original}`, `{back_translated}`
    pub compare_user: PromptTemplate,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            translate_system: PromptTemplate::new(TRANSLATE_SYSTEM),
            compare_system: PromptTemplate::new(COMPARE_SYSTEM),
            compare_user: PromptTemplate::new(COMPARE_USER),
        }
    }
}

impl PromptSet {
    /// Load templates from `dir`, falling back to the built-ins for missing files.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a template file exists but cannot be read.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut prompts = Self::default();

        for (file, slot) in [
            ("translate_system.txt", &mut prompts.translate_system),
            ("compare_system.txt", &mut prompts.compare_system),
            ("compare_user.txt", &mut prompts.compare_user),
        ] {
            let path = dir.join(file);
            if path.is_file() {
                debug!(path = %path.display(), "loading prompt");
                *slot = PromptTemplate::new(std::fs::read_to_string(&path)?.trim());
            }
        }

        Ok(prompts)
    }

    pub fn translate_system(&self, source: &str, target: &str) -> String {
        self.translate_system
            .render(&[("source", source), ("target", target)])
    }

    pub fn compare_system(&self, language: &str) -> String {
        self.compare_system.render(&[("language", language)])
    }

    pub fn compare_user(&self, original: &str, back_translated: &str) -> String {
        self.compare_user.render(&[
            ("original", original),
            ("back_translated", back_translated),
        ])
    }
}
