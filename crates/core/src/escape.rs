//! Markup escaping
//!
//! Every piece of user- or model-supplied text passes through [`escape_html`]
//! right before it is written into rendered output. There is no other
//! sanitization boundary in the crate.

/// Escape the five markup-significant characters.
///
/// `&`, `<`, `>`, `"` and `'` become `&amp;`, `&lt;`, `&gt;`, `&quot;` and
/// `&#039;`. Everything else is copied through unchanged.
///
/// # Example
///
/// ```rust
/// use transback_core::escape::escape_html;
///
/// assert_eq!(escape_html("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    push_escaped(&mut escaped, text);
    escaped
}

/// Append `text` to `out`, escaped.
pub fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        push_escaped_char(out, ch);
    }
}

/// Append a single escaped character to `out`.
pub fn push_escaped_char(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#039;"),
        other => out.push(other),
    }
}
