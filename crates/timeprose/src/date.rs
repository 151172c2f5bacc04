//! Date grammar: calendar shapes and relative keyword forms.
//!
//! Alternatives are tried in a fixed priority order and the first success
//! wins; there is no ambiguity scoring. Every rule is transactional: it
//! either fully populates the date fields of the builder (zeroing the time
//! fields, since a date without a time means midnight) or fails with the
//! cursor exactly where it started.
//!
//! Shape priority:
//!
//! 1. day-month-year (numeric or named month, separator-consistent)
//! 2. day-month (year falls back to the reference year)
//! 3. month-year (named month + 2/4-digit year, or numeric month + 4-digit year)
//! 4. month only (named month, day becomes 1)
//! 5. year-month-day (4-digit year first, separator-consistent)
//! 6. year-month (day becomes 1)
//! 7. year only (month/day become 1/1)
//! 8. relative keywords (`now`, `today`, `tomorrow`, `yesterday`, weekday names)
//!
//! A bare day-of-month is not part of this chain; the entry point tries it
//! as the overall last resort, so a lone number is only a day once every
//! richer interpretation has failed.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

use crate::builder::{days_in_month, DateTimeBuilder};
use crate::cursor::{attempt, try_number, try_token, TokenCursor};
use crate::token::{Token, TokenKind};

/// The tokens accepted as date-field separators.
const DATE_SEPARATORS: [Token<'static>; 4] = [
    Token {
        kind: TokenKind::Space,
        text: " ",
    },
    Token {
        kind: TokenKind::Punctuation,
        text: "/",
    },
    Token {
        kind: TokenKind::Punctuation,
        text: "-",
    },
    Token {
        kind: TokenKind::Punctuation,
        text: ".",
    },
];

/// Try every date shape in priority order.
pub(crate) fn try_date<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    attempt(cursor, |c| try_day_month_year(c, builder))
        .or_else(|| attempt(cursor, |c| try_day_month(c, builder)))
        .or_else(|| attempt(cursor, |c| try_month_year(c, builder)))
        .or_else(|| attempt(cursor, |c| try_month_only(c, builder)))
        .or_else(|| attempt(cursor, |c| try_year_month_day(c, builder)))
        .or_else(|| attempt(cursor, |c| try_year_month(c, builder)))
        .or_else(|| attempt(cursor, |c| try_year_only(c, builder)))
        .or_else(|| attempt(cursor, |c| try_relative(c, builder)))
}

/// A bare day-of-month, month and year falling back to the reference.
///
/// Kept out of [`try_date`]: the entry point tries this after the time
/// grammar has had its chance at the input.
pub(crate) fn try_day_only<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let day = try_day(cursor)?;
    accept(builder, builder.year(), builder.month(), day)
}

// ── Calendar shapes ─────────────────────────────────────────────────────────

fn try_day_month_year<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let day = try_day(cursor)?;
    let separator = try_separator(cursor)?;
    let month = try_month(cursor)?;
    try_token(cursor, separator)?;
    let year = try_year(cursor)?;
    accept(builder, year, month, day)
}

fn try_day_month<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let day = try_day(cursor)?;
    try_separator(cursor)?;
    let month = try_month(cursor)?;
    accept(builder, builder.year(), month, day)
}

fn try_month_year<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    attempt(cursor, |c| try_month_name_year(c, builder))
        .or_else(|| attempt(cursor, |c| try_month_numeric_year(c, builder)))
}

fn try_month_name_year<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let month = try_month_name(cursor)?;
    try_separator(cursor)?;
    let year = try_year(cursor)?;
    accept(builder, year, month, 1)
}

/// Numeric month + year only pairs with a 4-digit year; a numeric month next
/// to a 2-digit number is a day-month and was already claimed by that shape.
fn try_month_numeric_year<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let month = try_month_numeric(cursor)?;
    try_separator(cursor)?;
    let year = try_four_digit_year(cursor)?;
    accept(builder, year, month, 1)
}

fn try_month_only<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let month = try_month_name(cursor)?;
    accept(builder, builder.year(), month, 1)
}

fn try_year_month_day<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let year = try_four_digit_year(cursor)?;
    let separator = try_separator(cursor)?;
    let month = try_month(cursor)?;
    try_token(cursor, separator)?;
    let day = try_day(cursor)?;
    accept(builder, year, month, day)
}

fn try_year_month<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let year = try_four_digit_year(cursor)?;
    try_separator(cursor)?;
    let month = try_month(cursor)?;
    accept(builder, year, month, 1)
}

fn try_year_only<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let year = try_four_digit_year(cursor)?;
    accept(builder, year, 1, 1)
}

/// Window a two-digit year, check the day against the month length, and
/// commit all six fields: the single all-or-nothing write every calendar
/// shape funnels through.
fn accept<B: DateTimeBuilder>(builder: &mut B, year: i32, month: u32, day: u32) -> Option<()> {
    let year = if year < 100 { year + 2000 } else { year };
    if day > days_in_month(year, month)? {
        return None;
    }
    builder.set_year(year);
    builder.set_month(month);
    builder.set_day(day);
    zero_time(builder);
    Some(())
}

// ── Field parts ─────────────────────────────────────────────────────────────

fn try_day(cursor: &mut TokenCursor<'_>) -> Option<u32> {
    try_number(cursor, 1..=2, 1..=31)
}

fn try_month(cursor: &mut TokenCursor<'_>) -> Option<u32> {
    try_month_numeric(cursor).or_else(|| try_month_name(cursor))
}

fn try_month_numeric(cursor: &mut TokenCursor<'_>) -> Option<u32> {
    try_number(cursor, 1..=2, 1..=12)
}

fn try_month_name(cursor: &mut TokenCursor<'_>) -> Option<u32> {
    let token = cursor.peek(0);
    if token.kind != TokenKind::Text {
        return None;
    }
    let month = month_from_name(token.text)?;
    cursor.take();
    Some(month)
}

/// A 2-digit (windowed later) or 4-digit year.
fn try_year(cursor: &mut TokenCursor<'_>) -> Option<i32> {
    try_four_digit_year(cursor).or_else(|| try_number(cursor, 2..=2, 0..=99).map(|y| y as i32))
}

fn try_four_digit_year(cursor: &mut TokenCursor<'_>) -> Option<i32> {
    try_number(cursor, 4..=4, 0..=9999).map(|y| y as i32)
}

fn try_separator<'a>(cursor: &mut TokenCursor<'a>) -> Option<Token<'a>> {
    let token = cursor.peek(0);
    if DATE_SEPARATORS
        .iter()
        .any(|s| s.kind == token.kind && s.text == token.text)
    {
        cursor.take();
        return Some(token);
    }
    None
}

/// Month name lookup, case-insensitive, abbreviations and full names.
fn month_from_name(name: &str) -> Option<u32> {
    match name.to_ascii_lowercase().as_str() {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

// ── Relative keyword forms ──────────────────────────────────────────────────

/// `now`, `today`, `tomorrow`, `yesterday`, or a weekday name.
///
/// All but `now` resolve to midnight; `now` is the reference instant
/// verbatim, so it writes nothing at all.
fn try_relative<B: DateTimeBuilder>(
    cursor: &mut TokenCursor<'_>,
    builder: &mut B,
) -> Option<()> {
    let token = cursor.peek(0);
    if token.kind != TokenKind::Text {
        return None;
    }
    match token.text.to_ascii_lowercase().as_str() {
        "now" => {
            cursor.take();
            Some(())
        }
        "today" => {
            cursor.take();
            zero_time(builder);
            Some(())
        }
        "tomorrow" => {
            cursor.take();
            shift_reference_day(builder, true)
        }
        "yesterday" => {
            cursor.take();
            shift_reference_day(builder, false)
        }
        name => {
            let weekday = weekday_from_name(name)?;
            cursor.take();
            advance_to_next_weekday(builder, weekday)
        }
    }
}

/// Weekday name lookup, full English names, case handled by the caller.
fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Move the builder's date one calendar day forward or back, at midnight.
fn shift_reference_day<B: DateTimeBuilder>(builder: &mut B, forward: bool) -> Option<()> {
    let date = builder_date(builder)?;
    let date = if forward {
        date.succ_opt()?
    } else {
        date.pred_opt()?
    };
    set_date(builder, date);
    zero_time(builder);
    Some(())
}

/// Advance to the next occurrence of `weekday`, strictly in the future: a
/// reference day that already is that weekday advances a full 7 days.
fn advance_to_next_weekday<B: DateTimeBuilder>(builder: &mut B, weekday: Weekday) -> Option<()> {
    let date = builder_date(builder)?;
    let days_ahead = (weekday.num_days_from_monday() as i64
        - date.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    let days_ahead = if days_ahead == 0 { 7 } else { days_ahead };
    let date = date.checked_add_signed(TimeDelta::days(days_ahead))?;
    set_date(builder, date);
    zero_time(builder);
    Some(())
}

fn builder_date<B: DateTimeBuilder>(builder: &B) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(builder.year(), builder.month(), builder.day())
}

fn set_date<B: DateTimeBuilder>(builder: &mut B, date: NaiveDate) {
    builder.set_year(date.year());
    builder.set_month(date.month());
    builder.set_day(date.day());
}

fn zero_time<B: DateTimeBuilder>(builder: &mut B) {
    builder.set_hour(0);
    builder.set_minute(0);
    builder.set_second(0);
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NaiveDateTimeBuilder;
    use crate::token::tokenize;
    use chrono::NaiveDateTime;

    /// Sunday, September 10 1978, 14:30:10.
    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1978, 9, 10)
            .unwrap()
            .and_hms_opt(14, 30, 10)
            .unwrap()
    }

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    /// Run the date grammar the way the date-only entry alternative does:
    /// one shape, then nothing but whitespace.
    fn parse_date(input: &str) -> Option<NaiveDateTime> {
        let mut cursor = TokenCursor::new(tokenize(input));
        let mut builder = NaiveDateTimeBuilder::new(reference());
        try_date(&mut cursor, &mut builder)?;
        if !cursor.at_end() {
            return None;
        }
        builder.build()
    }

    #[test]
    fn test_day_month_year_numeric() {
        assert_eq!(parse_date("11/10/1978"), Some(instant(1978, 10, 11, 0, 0, 0)));
    }

    #[test]
    fn test_two_digit_year_windows_into_2000s() {
        assert_eq!(parse_date("11/10/78"), Some(instant(2078, 10, 11, 0, 0, 0)));
    }

    #[test]
    fn test_named_month_with_every_separator() {
        assert_eq!(parse_date("11/Oct/78"), Some(instant(2078, 10, 11, 0, 0, 0)));
        assert_eq!(parse_date("11-Oct-78"), Some(instant(2078, 10, 11, 0, 0, 0)));
        assert_eq!(parse_date("11.Oct.78"), Some(instant(2078, 10, 11, 0, 0, 0)));
        assert_eq!(parse_date("10 Sep 1978"), Some(instant(1978, 9, 10, 0, 0, 0)));
    }

    #[test]
    fn test_month_name_is_case_insensitive() {
        assert_eq!(parse_date("10/sep/1978"), Some(instant(1978, 9, 10, 0, 0, 0)));
        assert_eq!(parse_date("10/SEP/1978"), Some(instant(1978, 9, 10, 0, 0, 0)));
    }

    #[test]
    fn test_mixed_separators_rejected() {
        assert_eq!(parse_date("11/10-78"), None);
        assert_eq!(parse_date("11-10/78"), None);
        assert_eq!(parse_date("1978-Sep/10"), None);
    }

    #[test]
    fn test_day_month_falls_back_to_reference_year() {
        assert_eq!(parse_date("12/5"), Some(instant(1978, 5, 12, 0, 0, 0)));
    }

    #[test]
    fn test_month_only_and_month_year() {
        assert_eq!(parse_date("Sep"), Some(instant(1978, 9, 1, 0, 0, 0)));
        assert_eq!(parse_date("September"), Some(instant(1978, 9, 1, 0, 0, 0)));
        assert_eq!(parse_date("Sep 2002"), Some(instant(2002, 9, 1, 0, 0, 0)));
        assert_eq!(parse_date("September/2002"), Some(instant(2002, 9, 1, 0, 0, 0)));
    }

    #[test]
    fn test_numeric_month_year_needs_four_digit_year() {
        assert_eq!(parse_date("9/2002"), Some(instant(2002, 9, 1, 0, 0, 0)));
        // Two digits next to a numeric month is a day-month instead.
        assert_eq!(parse_date("9/02"), Some(instant(1978, 2, 9, 0, 0, 0)));
    }

    #[test]
    fn test_year_first_shapes() {
        assert_eq!(parse_date("1978"), Some(instant(1978, 1, 1, 0, 0, 0)));
        assert_eq!(parse_date("1978-Sep"), Some(instant(1978, 9, 1, 0, 0, 0)));
        assert_eq!(parse_date("1978-Sep-10"), Some(instant(1978, 9, 10, 0, 0, 0)));
        assert_eq!(parse_date("1978-9-10"), Some(instant(1978, 9, 10, 0, 0, 0)));
    }

    #[test]
    fn test_two_digit_number_is_not_a_year() {
        // A lone two-digit number never matches the year-only shape; the
        // entry point resolves it as a day-of-month instead.
        assert_eq!(parse_date("78"), None);
    }

    #[test]
    fn test_day_beyond_month_length_rejected() {
        assert_eq!(parse_date("31/Feb/1978"), None);
        assert_eq!(parse_date("30/Feb/1978"), None);
        assert_eq!(parse_date("28/Feb/1978"), Some(instant(1978, 2, 28, 0, 0, 0)));
    }

    #[test]
    fn test_windowed_leap_year_accepts_feb_29() {
        // "16" windows to 2016, which is a leap year.
        assert_eq!(parse_date("29/Feb/16"), Some(instant(2016, 2, 29, 0, 0, 0)));
        assert_eq!(parse_date("29/Feb/15"), None);
    }

    #[test]
    fn test_three_digit_day_rejected() {
        assert_eq!(parse_date("131/10/1978"), None);
    }

    #[test]
    fn test_now_keeps_reference_verbatim() {
        assert_eq!(parse_date("now"), Some(reference()));
    }

    #[test]
    fn test_today_is_reference_midnight() {
        assert_eq!(parse_date("today"), Some(instant(1978, 9, 10, 0, 0, 0)));
        assert_eq!(parse_date("Today"), Some(instant(1978, 9, 10, 0, 0, 0)));
    }

    #[test]
    fn test_tomorrow_and_yesterday() {
        assert_eq!(parse_date("tomorrow"), Some(instant(1978, 9, 11, 0, 0, 0)));
        assert_eq!(parse_date("yesterday"), Some(instant(1978, 9, 9, 0, 0, 0)));
    }

    #[test]
    fn test_tomorrow_crosses_month_boundary() {
        let mut cursor = TokenCursor::new(tokenize("tomorrow"));
        let mut builder = NaiveDateTimeBuilder::new(instant(1978, 9, 30, 8, 0, 0));
        try_date(&mut cursor, &mut builder).unwrap();
        assert_eq!(builder.build(), Some(instant(1978, 10, 1, 0, 0, 0)));
    }

    #[test]
    fn test_weekdays_advance_one_to_seven_days() {
        // The reference is itself a Sunday, so "sunday" means a full week out.
        assert_eq!(parse_date("sunday"), Some(instant(1978, 9, 17, 0, 0, 0)));
        assert_eq!(parse_date("monday"), Some(instant(1978, 9, 11, 0, 0, 0)));
        assert_eq!(parse_date("tuesday"), Some(instant(1978, 9, 12, 0, 0, 0)));
        assert_eq!(parse_date("wednesday"), Some(instant(1978, 9, 13, 0, 0, 0)));
        assert_eq!(parse_date("thursday"), Some(instant(1978, 9, 14, 0, 0, 0)));
        assert_eq!(parse_date("friday"), Some(instant(1978, 9, 15, 0, 0, 0)));
        assert_eq!(parse_date("saturday"), Some(instant(1978, 9, 16, 0, 0, 0)));
    }

    #[test]
    fn test_unknown_word_rejected() {
        assert_eq!(parse_date("someday"), None);
        assert_eq!(parse_date("Sep2002"), None);
    }

    #[test]
    fn test_failed_shape_leaves_cursor_at_start() {
        let mut cursor = TokenCursor::new(tokenize("31/Feb/1978"));
        let mut builder = NaiveDateTimeBuilder::new(reference());
        assert!(try_date(&mut cursor, &mut builder).is_none());
        assert_eq!(cursor.peek(0).text, "31");
    }
}
