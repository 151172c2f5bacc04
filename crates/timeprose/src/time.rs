//! Clock-time grammar.
//!
//! Five shapes, tried most-specific first:
//!
//! 1. hour:minute:second + AM/PM
//! 2. hour:minute:second (24-hour)
//! 3. hour:minute + AM/PM
//! 4. hour:minute (24-hour)
//! 5. hour + AM/PM
//!
//! `:` is the only minute/second separator, and the same separator token
//! must repeat between minute and second, mirroring the date grammar's
//! separator-consistency rule. A bare hour without AM/PM is not a time: at
//! the entry-point level a lone small number resolves as a day-of-month.
//!
//! Time rules write only the hour/minute/second fields, so the date fields
//! keep their reference values when a time stands alone.

use crate::builder::DateTimeBuilder;
use crate::cursor::{attempt, try_number, try_token, TokenCursor};
use crate::token::{Token, TokenKind};

/// The minute/second separator.
const TIME_SEPARATOR: Token<'static> = Token {
    kind: TokenKind::Punctuation,
    text: ":",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Try every time shape in priority order.
pub(crate) fn try_time<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    attempt(cursor, |c| try_hour_minute_second_meridiem(c, builder))
        .or_else(|| attempt(cursor, |c| try_hour_minute_second(c, builder)))
        .or_else(|| attempt(cursor, |c| try_hour_minute_meridiem(c, builder)))
        .or_else(|| attempt(cursor, |c| try_hour_minute(c, builder)))
        .or_else(|| attempt(cursor, |c| try_hour_meridiem(c, builder)))
}

// ── Shapes ──────────────────────────────────────────────────────────────────

fn try_hour_minute_second_meridiem<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let hour = try_hour_12(cursor)?;
    let separator = try_token(cursor, TIME_SEPARATOR)?;
    let minute = try_minute(cursor)?;
    try_token(cursor, separator)?;
    let second = try_second(cursor)?;
    let hour = normalize_hour(hour, try_meridiem(cursor)?);
    write_time(builder, hour, minute, second);
    Some(())
}

fn try_hour_minute_second<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let hour = try_hour_24(cursor)?;
    let separator = try_token(cursor, TIME_SEPARATOR)?;
    let minute = try_minute(cursor)?;
    try_token(cursor, separator)?;
    let second = try_second(cursor)?;
    write_time(builder, hour, minute, second);
    Some(())
}

fn try_hour_minute_meridiem<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let hour = try_hour_12(cursor)?;
    try_token(cursor, TIME_SEPARATOR)?;
    let minute = try_minute(cursor)?;
    let hour = normalize_hour(hour, try_meridiem(cursor)?);
    write_time(builder, hour, minute, 0);
    Some(())
}

fn try_hour_minute<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let hour = try_hour_24(cursor)?;
    try_token(cursor, TIME_SEPARATOR)?;
    let minute = try_minute(cursor)?;
    write_time(builder, hour, minute, 0);
    Some(())
}

fn try_hour_meridiem<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let hour = try_hour_12(cursor)?;
    let hour = normalize_hour(hour, try_meridiem(cursor)?);
    write_time(builder, hour, 0, 0);
    Some(())
}

// ── Parts ───────────────────────────────────────────────────────────────────

fn try_hour_12(cursor: &mut TokenCursor<'_>) -> Option<u32> {
    try_number(cursor, 1..=2, 0..=12)
}

fn try_hour_24(cursor: &mut TokenCursor<'_>) -> Option<u32> {
    try_number(cursor, 1..=2, 0..=23)
}

fn try_minute(cursor: &mut TokenCursor<'_>) -> Option<u32> {
    try_number(cursor, 1..=2, 0..=59)
}

fn try_second(cursor: &mut TokenCursor<'_>) -> Option<u32> {
    try_number(cursor, 1..=2, 0..=59)
}

/// An AM/PM marker, case-insensitive, after optional whitespace.
fn try_meridiem(cursor: &mut TokenCursor<'_>) -> Option<Meridiem> {
    let spaces = cursor.skip_while(Token::is_space);
    let token = cursor.peek(spaces);
    if token.kind != TokenKind::Text {
        return None;
    }
    let meridiem = if token.text.eq_ignore_ascii_case("am") {
        Meridiem::Am
    } else if token.text.eq_ignore_ascii_case("pm") {
        Meridiem::Pm
    } else {
        return None;
    };
    cursor.take_count(spaces + 1);
    Some(meridiem)
}

/// 12-hour to 24-hour: PM below 12 adds 12, 12 AM wraps to 0.
fn normalize_hour(hour: u32, meridiem: Meridiem) -> u32 {
    match meridiem {
        Meridiem::Am if hour == 12 => 0,
        Meridiem::Am => hour,
        Meridiem::Pm if hour < 12 => hour + 12,
        Meridiem::Pm => hour,
    }
}

fn write_time<B: DateTimeBuilder>(builder: &mut B, hour: u32, minute: u32, second: u32) {
    builder.set_hour(hour);
    builder.set_minute(minute);
    builder.set_second(second);
}

// ── Tests ───────────────────────────────────────────────────────────────────
