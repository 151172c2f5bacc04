//! Entry points: ordered top-level alternation over the grammar families.
//!
//! `parse_datetime` tries, against one shared cursor and accumulator:
//! date-then-time, date-only, time-only, and finally a bare day-of-month,
//! in that order, each alternative required to consume the entire input
//! (leading and trailing whitespace aside) before it may win.
//!
//! `parse_duration` is a separate entry point; the duration grammar is never
//! combined with the date/time grammars in one call.
//!
//! Parsing is all-or-nothing: on failure the caller gets an error and no
//! partial state, never a half-resolved value. Both entry points take the
//! reference instant explicitly — there is no system clock access anywhere
//! in the crate, which keeps every call pure and testable.

use chrono::{NaiveDateTime, TimeDelta};

use crate::builder::{
    DateTimeBuilder, DurationBuilder, NaiveDateTimeBuilder, TimeDeltaBuilder,
};
use crate::cursor::{attempt, TokenCursor};
use crate::error::{ParseError, Result};
use crate::token::{tokenize, Token};
use crate::{date, duration, time};

/// Parse a human-written date and/or time against a reference instant.
///
/// Fields the input does not determine fall back to the reference: a
/// date-only input resolves to midnight of that date, a time-only input to
/// that time on the reference day, and a bare day-of-month to that day in
/// the reference month and year. Two-digit years window into the 2000s.
///
/// # Arguments
///
/// * `input` — The text to parse (e.g. `"11/10/78"`, `"Sep 2002"`,
///   `"3:45 PM"`, `"tomorrow"`, `"monday 2am"`)
/// * `reference` — The instant that supplies every unspecified field
///
/// # Errors
///
/// Returns [`ParseError::InvalidExpression`] if no grammar alternative
/// consumes the whole input, or if the matched shape is calendrically
/// invalid (e.g. `"31/Feb/1978"`).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timeprose::parse_datetime;
///
/// let reference = NaiveDate::from_ymd_opt(1978, 9, 10)
///     .unwrap()
///     .and_hms_opt(14, 30, 10)
///     .unwrap();
///
/// let parsed = parse_datetime("Sep 2002", reference).unwrap();
/// assert_eq!(
///     parsed,
///     NaiveDate::from_ymd_opt(2002, 9, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
/// );
/// ```
pub fn parse_datetime(input: &str, reference: NaiveDateTime) -> Result<NaiveDateTime> {
    let mut builder = NaiveDateTimeBuilder::new(reference);
    parse_datetime_into(input, &mut builder)?;
    builder
        .build()
        .ok_or_else(|| ParseError::InvalidResolution(input.trim().to_string()))
}

/// Parse a date and/or time into a caller-supplied accumulator.
///
/// This is the seam for materializing something other than a
/// [`NaiveDateTime`]: implement [`DateTimeBuilder`], seed its six fields
/// from your reference, and read them back after a successful parse. The
/// winning grammar rule writes only the fields its shape determines.
///
/// # Errors
///
/// Returns [`ParseError::InvalidExpression`] if no alternative consumes the
/// whole input. The builder is not guaranteed untouched after a failed
/// parse; discard it on error.
pub fn parse_datetime_into<B: DateTimeBuilder>(input: &str, builder: &mut B) -> Result<()> {
    let mut cursor = TokenCursor::new(tokenize(input));
    cursor.take_while(Token::is_space);

    attempt(&mut cursor, |c| try_date_then_time(c, builder))
        .or_else(|| attempt(&mut cursor, |c| try_date_only(c, builder)))
        .or_else(|| attempt(&mut cursor, |c| try_time_only(c, builder)))
        .or_else(|| attempt(&mut cursor, |c| try_day_of_month(c, builder)))
        .ok_or_else(|| ParseError::InvalidExpression(input.trim().to_string()))
}

/// Parse a human-written duration (e.g. `"2h"`, `"2y 6mo"`, `"1.5h 30s"`)
/// against a reference instant.
///
/// The reference matters: year and month magnitudes walk the calendar from
/// it, so `"2y"` from a reference shortly before a leap day spans 731 days
/// while the same input from elsewhere spans 730. An empty input is the
/// zero duration.
///
/// # Errors
///
/// Returns [`ParseError::InvalidExpression`] if the input is not a
/// descending sequence of unit segments consuming the whole input.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use timeprose::parse_duration;
///
/// let reference = NaiveDate::from_ymd_opt(2016, 2, 10)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
///
/// assert_eq!(parse_duration("2h", reference).unwrap(), TimeDelta::hours(2));
/// assert_eq!(parse_duration("2y", reference).unwrap(), TimeDelta::days(731));
/// ```
pub fn parse_duration(input: &str, reference: NaiveDateTime) -> Result<TimeDelta> {
    let mut builder = TimeDeltaBuilder::new(reference);
    parse_duration_into(input, &mut builder)?;
    builder
        .build()
        .ok_or_else(|| ParseError::InvalidResolution(input.trim().to_string()))
}

/// Parse a duration into a caller-supplied magnitude accumulator.
///
/// The counterpart of [`parse_datetime_into`] for durations: implement
/// [`DurationBuilder`] to resolve the six decimal magnitudes into your own
/// span type.
///
/// # Errors
///
/// Returns [`ParseError::InvalidExpression`] if the input is not a valid
/// duration.
pub fn parse_duration_into<B: DurationBuilder>(input: &str, builder: &mut B) -> Result<()> {
    let mut cursor = TokenCursor::new(tokenize(input));
    duration::try_duration(&mut cursor, builder)
        .ok_or_else(|| ParseError::InvalidExpression(input.trim().to_string()))
}

// ── Top-level alternatives ──────────────────────────────────────────────────

fn try_date_then_time<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    date::try_date(cursor, builder)?;
    cursor.take_while(Token::is_space);
    time::try_time(cursor, builder)?;
    cursor.at_end().then_some(())
}

fn try_date_only<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    date::try_date(cursor, builder)?;
    cursor.at_end().then_some(())
}

fn try_time_only<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    time::try_time(cursor, builder)?;
    cursor.at_end().then_some(())
}

fn try_day_of_month<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    date::try_day_only(cursor, builder)?;
    cursor.at_end().then_some(())
}

// ── Tests ───────────────────────────────────────────────────────────────────
