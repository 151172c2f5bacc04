//! Duration grammar: decimal magnitudes with unit suffixes.
//!
//! A duration is an ordered sequence of optional segments, one per unit, in
//! strictly descending unit order: `y`, `mo`, `d`, `h`, `m`, `s`. Each
//! segment is a decimal magnitude followed by its suffix, with optional
//! whitespace around both. Because the chain makes a single descending pass,
//! an out-of-order unit (`"1s 2h"`) or a repeated unit (`"1m 2m"`) is left
//! unconsumed and fails the mandatory end-of-input check. Repeats are
//! rejected, never summed.
//!
//! An empty (or all-whitespace) input is the zero duration: every segment is
//! optional and the chain falls through to the end check.

use rust_decimal::Decimal;

use crate::builder::DurationBuilder;
use crate::cursor::{attempt, TokenCursor};
use crate::token::{Token, TokenKind};

/// The six duration units, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

const UNITS: [Unit; 6] = [
    Unit::Years,
    Unit::Months,
    Unit::Days,
    Unit::Hours,
    Unit::Minutes,
    Unit::Seconds,
];

impl Unit {
    /// The suffix token text for this unit. Lowercase-exact: `"2H"` is not
    /// an hour count.
    fn suffix(self) -> &'static str {
        match self {
            Unit::Years => "y",
            Unit::Months => "mo",
            Unit::Days => "d",
            Unit::Hours => "h",
            Unit::Minutes => "m",
            Unit::Seconds => "s",
        }
    }

    fn apply<B: DurationBuilder>(self, builder: &mut B, value: Decimal) {
        match self {
            Unit::Years => builder.set_years(value),
            Unit::Months => builder.set_months(value),
            Unit::Days => builder.set_days(value),
            Unit::Hours => builder.set_hours(value),
            Unit::Minutes => builder.set_minutes(value),
            Unit::Seconds => builder.set_seconds(value),
        }
    }
}

/// One descending pass over the unit chain, then end-of-input.
pub(crate) fn try_duration<B: DurationBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    for unit in UNITS {
        if let Some(value) = attempt(cursor, |c| try_segment(c, unit)) {
            unit.apply(builder, value);
        }
    }
    cursor.at_end().then_some(())
}

/// `<decimal> <suffix>` for one specific unit, whitespace-tolerant.
fn try_segment(cursor: &mut TokenCursor<'_>, unit: Unit) -> Option<Decimal> {
    cursor.take_while(Token::is_space);
    let value = try_decimal(cursor)?;
    cursor.take_while(Token::is_space);
    let token = cursor.take();
    if token.kind == TokenKind::Text && token.text == unit.suffix() {
        return Some(value);
    }
    None
}

/// An integer part optionally followed by `.` and a fraction part; both
/// parts must contain at least one digit when the point is present.
fn try_decimal(cursor: &mut TokenCursor<'_>) -> Option<Decimal> {
    let token = cursor.peek(0);
    if token.kind != TokenKind::Number {
        return None;
    }
    let whole: i64 = token.text.parse().ok()?;
    cursor.take();
    let mut value = Decimal::from(whole);

    let point = cursor.peek(0);
    if point.kind == TokenKind::Punctuation && point.text == "." {
        cursor.take();
        let fraction = cursor.peek(0);
        if fraction.kind != TokenKind::Number {
            return None;
        }
        let digits: i64 = fraction.text.parse().ok()?;
        cursor.take();
        value += Decimal::new(digits, fraction.text.len() as u32);
    }

    Some(value)
}

// ── Tests ───────────────────────────────────────────────────────────────────
