//! Subcommands and the output helpers they share

pub mod diff;
pub mod replay;
pub mod translate;

use anyhow::{Context, Result};
use std::path::Path;
use transback_core::escape::escape_html;
use transback_core::{HighlightConfig, HighlightPair};

/// Read a UTF-8 text file
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write `content` to `path`, or to stdout when no path is given
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Standalone HTML page showing both highlighted directions
pub fn render_page(pair: &HighlightPair, config: &HighlightConfig) -> String {
    let summary = escape_html(&pair.summary());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Back-translation highlight</title>
<style>
body {{ font-family: sans-serif; max-width: 60rem; margin: 2rem auto; }}
.text {{ white-space: pre-wrap; border: 1px solid #ccc; padding: 1rem; }}
.{word} {{ background: #fff3b0; }}
.{char} {{ background: #ff9a9a; font-weight: bold; }}
</style>
</head>
<body>
<p>{summary}</p>
<h2>Original</h2>
<div class="text" id="original">{original}</div>
<h2>Back-translated</h2>
<div class="text" id="back-translated">{back}</div>
</body>
</html>
"#,
        word = config.word_class(),
        char = config.char_class(),
        summary = summary,
        original = pair.original.markup,
        back = pair.back_translated.markup,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use transback_core::HighlightEngine;

    #[test]
    fn test_page_embeds_markup_and_styles() {
        let config = HighlightConfig::new().with_word_class("w");
        let pair = HighlightEngine::new(config.clone()).highlight_differences("a <b>", "a <i>");
        let page = render_page(&pair, &config);

        assert!(page.contains(".w {"));
        assert!(page.contains(".diff-char {"));
        assert!(page.contains(&pair.original.markup));
        assert!(page.contains(&pair.back_translated.markup));
        assert!(!page.contains("<b>"));
    }
}
