//! Replayable lookahead cursor over a token sequence.
//!
//! The cursor is the only mutable state the grammar engine touches while
//! matching: backtracking is a single integer assignment, so checkpoints are
//! free to nest as deeply as rule composition requires. Tokens themselves are
//! never mutated.

use std::ops::RangeInclusive;

use crate::token::{Token, TokenKind};

/// A saved cursor position.
///
/// Newtype so a rollback target can only come from [`TokenCursor::checkpoint`].
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

/// A transactional cursor over one materialized token sequence.
#[derive(Debug)]
pub struct TokenCursor<'a> {
    tokens: Vec<Token<'a>>,
    index: usize,
}

impl<'a> TokenCursor<'a> {
    /// Create a cursor positioned at the first token.
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens, index: 0 }
    }

    /// The token `offset` positions ahead of the current index, or
    /// [`Token::END`] past the end. Never advances.
    pub fn peek(&self, offset: usize) -> Token<'a> {
        self.tokens
            .get(self.index + offset)
            .copied()
            .unwrap_or(Token::END)
    }

    /// Advance past one token and return it (or [`Token::END`] past the end).
    pub fn take(&mut self) -> Token<'a> {
        self.take_count(1)
    }

    /// Advance past `count` tokens and return the last one consumed.
    pub fn take_count(&mut self, count: usize) -> Token<'a> {
        self.index += count;
        self.tokens
            .get(self.index.wrapping_sub(1))
            .copied()
            .unwrap_or(Token::END)
    }

    /// Length of the run of upcoming tokens matching `pred`, without
    /// consuming anything.
    pub fn skip_while(&self, pred: impl Fn(&Token<'a>) -> bool) -> usize {
        let mut count = 0;
        while pred(&self.peek(count)) {
            count += 1;
        }
        count
    }

    /// Consume the run of upcoming tokens matching `pred`.
    pub fn take_while(&mut self, pred: impl Fn(&Token<'a>) -> bool) {
        let count = self.skip_while(pred);
        self.index += count;
    }

    /// Save the current position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.index)
    }

    /// Restore a previously saved position.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.index = checkpoint.0;
    }

    /// True iff only whitespace remains; consumes that whitespace when true.
    pub fn at_end(&mut self) -> bool {
        let count = self.skip_while(Token::is_space);
        if self.peek(count).kind == TokenKind::End {
            self.index += count;
            return true;
        }
        false
    }
}

/// Run `rule` transactionally: on `None` the cursor is restored to where it
/// was, so a failed attempt leaves no trace.
///
/// Every composite grammar rule goes through this combinator rather than
/// managing checkpoints by hand; single-token rules peek before they take and
/// need no wrapping.
pub fn attempt<'a, T>(
    cursor: &mut TokenCursor<'a>,
    rule: impl FnOnce(&mut TokenCursor<'a>) -> Option<T>,
) -> Option<T> {
    let checkpoint = cursor.checkpoint();
    let result = rule(cursor);
    if result.is_none() {
        cursor.rollback(checkpoint);
    }
    result
}

/// Consume the next token if it is a [`TokenKind::Number`] whose digit width
/// lies in `width` and whose value lies in `range`. Never consumes on
/// failure.
///
/// The width check runs before the value check, which is what distinguishes
/// `"9"`, `"09"`, and `"099"` when the grammar disambiguates fields by their
/// written length.
pub fn try_number(
    cursor: &mut TokenCursor<'_>,
    width: RangeInclusive<usize>,
    range: RangeInclusive<u32>,
) -> Option<u32> {
    let token = cursor.peek(0);
    if token.kind != TokenKind::Number || !width.contains(&token.text.len()) {
        return None;
    }
    let value = token.as_number();
    if !range.contains(&value) {
        return None;
    }
    cursor.take();
    Some(value)
}

/// Consume the next token if it structurally equals `expected` (same kind,
/// same text), returning the consumed token. Never consumes on failure.
pub fn try_token<'a>(cursor: &mut TokenCursor<'a>, expected: Token<'_>) -> Option<Token<'a>> {
    let token = cursor.peek(0);
    if token.kind == expected.kind && token.text == expected.text {
        cursor.take();
        return Some(token);
    }
    None
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    #[test]
    fn test_peek_does_not_advance() {
        let cursor = TokenCursor::new(tokenize("10 AM"));
        assert_eq!(cursor.peek(0).text, "10");
        assert_eq!(cursor.peek(0).text, "10");
        assert_eq!(cursor.peek(2).text, "AM");
    }

    #[test]
    fn test_peek_past_end_is_end_forever() {
        let mut cursor = TokenCursor::new(tokenize("10"));
        cursor.take();
        assert_eq!(cursor.peek(0), Token::END);
        assert_eq!(cursor.peek(5), Token::END);
        assert_eq!(cursor.take(), Token::END);
        assert_eq!(cursor.peek(0), Token::END);
    }

    #[test]
    fn test_take_returns_consumed_token() {
        let mut cursor = TokenCursor::new(tokenize("10:32"));
        assert_eq!(cursor.take().text, "10");
        assert_eq!(cursor.take().text, ":");
        assert_eq!(cursor.take().text, "32");
    }

    #[test]
    fn test_take_count_returns_last() {
        let mut cursor = TokenCursor::new(tokenize("3 PM"));
        assert_eq!(cursor.take_count(2).text, " ");
        assert_eq!(cursor.peek(0).text, "PM");
    }

    #[test]
    fn test_skip_while_is_lookahead_only() {
        let mut cursor = TokenCursor::new(tokenize("   PM"));
        assert_eq!(cursor.skip_while(Token::is_space), 3);
        assert_eq!(cursor.peek(0).kind, TokenKind::Space);
        cursor.take_while(Token::is_space);
        assert_eq!(cursor.peek(0).text, "PM");
    }

    #[test]
    fn test_nested_checkpoints_restore_independently() {
        let mut cursor = TokenCursor::new(tokenize("11/10/78"));
        let outer = cursor.checkpoint();
        cursor.take();
        let inner = cursor.checkpoint();
        cursor.take();
        cursor.take();
        cursor.rollback(inner);
        assert_eq!(cursor.peek(0).text, "/");
        cursor.rollback(outer);
        assert_eq!(cursor.peek(0).text, "11");
    }

    #[test]
    fn test_at_end_consumes_trailing_whitespace() {
        let mut cursor = TokenCursor::new(tokenize("10   "));
        cursor.take();
        assert!(cursor.at_end());
        assert_eq!(cursor.peek(0), Token::END);
    }

    #[test]
    fn test_at_end_false_leaves_cursor_untouched() {
        let mut cursor = TokenCursor::new(tokenize("  x"));
        assert!(!cursor.at_end());
        assert_eq!(cursor.peek(0).kind, TokenKind::Space);
    }

    #[test]
    fn test_attempt_rolls_back_on_failure() {
        let mut cursor = TokenCursor::new(tokenize("10:32"));
        let result: Option<()> = attempt(&mut cursor, |c| {
            c.take();
            c.take();
            None
        });
        assert!(result.is_none());
        assert_eq!(cursor.peek(0).text, "10");
    }

    #[test]
    fn test_attempt_keeps_consumption_on_success() {
        let mut cursor = TokenCursor::new(tokenize("10:32"));
        let result = attempt(&mut cursor, |c| Some(c.take().as_number()));
        assert_eq!(result, Some(10));
        assert_eq!(cursor.peek(0).text, ":");
    }

    #[test]
    fn test_try_number_checks_width_before_value() {
        // "099" is worth 99 but written three digits wide, so a two-digit
        // field must not accept it.
        let mut cursor = TokenCursor::new(tokenize("099"));
        assert_eq!(try_number(&mut cursor, 1..=2, 0..=99), None);
        assert_eq!(cursor.peek(0).text, "099");
    }

    #[test]
    fn test_try_number_rejects_out_of_range_without_consuming() {
        let mut cursor = TokenCursor::new(tokenize("45"));
        assert_eq!(try_number(&mut cursor, 1..=2, 1..=31), None);
        assert_eq!(cursor.peek(0).text, "45");
        assert_eq!(try_number(&mut cursor, 1..=2, 0..=59), Some(45));
    }

    #[test]
    fn test_try_token_matches_structurally() {
        let mut cursor = TokenCursor::new(tokenize("/x"));
        let slash = Token {
            kind: TokenKind::Punctuation,
            text: "/",
        };
        assert!(try_token(&mut cursor, slash).is_some());
        assert!(try_token(&mut cursor, slash).is_none());
        assert_eq!(cursor.peek(0).text, "x");
    }
}
