//! Lexical classification of raw input text.
//!
//! The classifier turns a string into a flat, order-preserving sequence of
//! [`Token`]s covering every input character exactly once — whitespace and
//! punctuation are tokens too, never skipped. The grammar layer decides what
//! matters; the classifier only answers "what kind of character run is this".
//!
//! # Classification rules
//!
//! - A letter starts a [`TokenKind::Text`] token and extends greedily over
//!   letters *and* digits, so `"3AM"` is `Number "3"` + `Text "AM"` while
//!   `"Sep2002"` is the single token `Text "Sep2002"`.
//! - A decimal digit starts a [`TokenKind::Number`] token covering the
//!   maximal digit run, leading zeros preserved (`"09"` and `"9"` are
//!   different tokens — the grammar's field-width checks depend on this).
//! - Punctuation, symbol, and whitespace characters become single-character
//!   tokens of their respective kinds.
//! - Anything else becomes [`TokenKind::Other`], which no grammar rule
//!   matches, so its presence anywhere guarantees overall parse failure.
//!
//! The classifier always terminates and never fails: malformed input is the
//! grammar's problem, not the lexer's.

/// The lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A maximal run of ASCII decimal digits.
    Number,
    /// A maximal run of letters-or-digits starting with a letter.
    Text,
    /// A single punctuation character (`/`, `-`, `.`, `:`, ...).
    Punctuation,
    /// A single symbol character (`$`, `+`, `=`, ...).
    Symbol,
    /// A single whitespace character.
    Space,
    /// A single character no other class claims.
    Other,
    /// The end-of-input sentinel. Never stored in a token sequence; it is
    /// what a cursor yields once the real tokens are exhausted.
    End,
}

/// One classified lexical unit of the input.
///
/// Equality is structural (kind plus text), which is what makes the
/// separator-consistency rule work: the separator between day and month must
/// compare equal, token for token, to the one between month and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The lexical class.
    pub kind: TokenKind,
    /// The exact input characters this token covers.
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// The end-of-input sentinel.
    pub const END: Token<'static> = Token {
        kind: TokenKind::End,
        text: "",
    };

    /// True if this is a single-whitespace token.
    pub fn is_space(&self) -> bool {
        self.kind == TokenKind::Space
    }

    /// The numeric value of a [`TokenKind::Number`] token.
    ///
    /// # Panics
    ///
    /// Panics if the token is not a `Number`, or if its digit run overflows
    /// `u32`. Grammar rules check the token kind and digit width before
    /// calling, so reaching either panic is a programming error, not an
    /// input error.
    pub fn as_number(&self) -> u32 {
        assert!(
            self.kind == TokenKind::Number,
            "as_number called on {:?} token {:?}",
            self.kind,
            self.text
        );
        self.text
            .parse()
            .unwrap_or_else(|_| panic!("numeric token overflows u32: {:?}", self.text))
    }
}

/// ASCII characters classified as symbols rather than punctuation.
fn is_symbol(c: char) -> bool {
    matches!(c, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~')
}

/// Classify `input` into its full token sequence.
///
/// Deterministic and total: every character of the input lands in exactly
/// one token, in order.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        let (kind, len) = if c.is_alphabetic() {
            (TokenKind::Text, run_len(rest, |c| c.is_alphanumeric()))
        } else if c.is_ascii_digit() {
            (TokenKind::Number, run_len(rest, |c| c.is_ascii_digit()))
        } else if c.is_whitespace() {
            (TokenKind::Space, c.len_utf8())
        } else if is_symbol(c) {
            (TokenKind::Symbol, c.len_utf8())
        } else if c.is_ascii_punctuation() {
            (TokenKind::Punctuation, c.len_utf8())
        } else {
            (TokenKind::Other, c.len_utf8())
        };

        tokens.push(Token {
            kind,
            text: &rest[..len],
        });
        rest = &rest[len..];
    }

    tokens
}

/// Byte length of the leading run of characters matching `pred`.
fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.find(|c| !pred(c)).unwrap_or(s.len())
}

// ── Tests ───────────────────────────────────────────────────────────────────
