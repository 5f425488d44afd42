//! Whitespace tokenizer
//!
//! Splits text into maximal runs of whitespace and non-whitespace characters.
//! The display side of an alignment keeps whitespace runs so the original
//! spacing can be reproduced exactly; the reference side drops them because
//! only word positions matter there.

/// Byte span of a token in the text it was cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Kind of run a token covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of non-whitespace characters
    Word,
    /// A run of whitespace characters
    Whitespace,
}

impl TokenKind {
    fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            TokenKind::Whitespace
        } else {
            TokenKind::Word
        }
    }
}

/// A single token borrowed from its source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token text
    pub text: &'a str,

    /// Byte span in the source text
    pub span: Span,

    /// Whitespace or word
    pub kind: TokenKind,

    /// Position in the emitted token sequence
    pub index: usize,
}

impl<'a> Token<'a> {
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

/// Splits text on whitespace boundaries
#[derive(Debug, Clone, Copy)]
pub struct WhitespaceTokenizer {
    /// Whether whitespace runs are emitted as tokens
    pub include_whitespace: bool,
}

impl WhitespaceTokenizer {
    /// Tokenizer that keeps whitespace runs (display side)
    pub fn new() -> Self {
        Self {
            include_whitespace: true,
        }
    }

    /// Tokenizer that drops whitespace runs (reference side)
    pub fn words_only() -> Self {
        Self {
            include_whitespace: false,
        }
    }

    /// Split `text` into tokens.
    ///
    /// With whitespace included, concatenating the token texts gives back
    /// `text` exactly. No token is ever empty.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut current_start = 0;
        let mut current_kind: Option<TokenKind> = None;

        for (pos, ch) in text.char_indices() {
            let kind = TokenKind::of(ch);

            match current_kind {
                None => {
                    current_start = pos;
                    current_kind = Some(kind);
                }
                Some(prev) if prev == kind => {}
                Some(prev) => {
                    self.emit(&mut tokens, text, Span::new(current_start, pos), prev);
                    current_start = pos;
                    current_kind = Some(kind);
                }
            }
        }

        if let Some(kind) = current_kind {
            self.emit(&mut tokens, text, Span::new(current_start, text.len()), kind);
        }

        tokens
    }

    /// Only the word texts of `text`, in order.
    pub fn words<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }

    fn emit<'a>(&self, tokens: &mut Vec<Token<'a>>, text: &'a str, span: Span, kind: TokenKind) {
        if kind == TokenKind::Whitespace && !self.include_whitespace {
            return;
        }

        tokens.push(Token {
            text: &text[span.start..span.end],
            span,
            kind,
            index: tokens.len(),
        });
    }
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}
