//! Field accumulators written to by the grammar engine.
//!
//! Two builder variants share the same shape (six gettable/settable
//! temporal fields) but differ in field type and meaning:
//!
//! - [`DateTimeBuilder`] carries *absolute* integer fields (year, month,
//!   day, hour, minute, second), pre-seeded from a reference instant so a
//!   partial input inherits whatever it does not specify.
//! - [`DurationBuilder`] carries *magnitude* decimal fields, each a signed
//!   quantity of that unit, all defaulting to zero.
//!
//! The traits are the stable seam between the grammar and the output type:
//! [`NaiveDateTimeBuilder`] and [`TimeDeltaBuilder`] materialize chrono
//! values, but a caller can supply its own implementation to build something
//! else from the same six fields.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Absolute date/time fields, settable one at a time by grammar rules.
pub trait DateTimeBuilder {
    fn year(&self) -> i32;
    fn month(&self) -> u32;
    fn day(&self) -> u32;
    fn hour(&self) -> u32;
    fn minute(&self) -> u32;
    fn second(&self) -> u32;

    fn set_year(&mut self, year: i32);
    fn set_month(&mut self, month: u32);
    fn set_day(&mut self, day: u32);
    fn set_hour(&mut self, hour: u32);
    fn set_minute(&mut self, minute: u32);
    fn set_second(&mut self, second: u32);
}

/// Decimal per-unit duration magnitudes, settable one at a time.
pub trait DurationBuilder {
    fn years(&self) -> Decimal;
    fn months(&self) -> Decimal;
    fn days(&self) -> Decimal;
    fn hours(&self) -> Decimal;
    fn minutes(&self) -> Decimal;
    fn seconds(&self) -> Decimal;

    fn set_years(&mut self, years: Decimal);
    fn set_months(&mut self, months: Decimal);
    fn set_days(&mut self, days: Decimal);
    fn set_hours(&mut self, hours: Decimal);
    fn set_minutes(&mut self, minutes: Decimal);
    fn set_seconds(&mut self, seconds: Decimal);
}

// ── NaiveDateTimeBuilder ────────────────────────────────────────────────────

/// The built-in absolute accumulator, materializing a [`NaiveDateTime`].
///
/// All six fields start at the reference instant's values, so a grammar rule
/// only writes the fields its shape determines and the rest fall back to the
/// reference.
#[derive(Debug, Clone)]
pub struct NaiveDateTimeBuilder {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl NaiveDateTimeBuilder {
    /// Create a builder seeded from `reference`.
    pub fn new(reference: NaiveDateTime) -> Self {
        Self {
            year: reference.year(),
            month: reference.month(),
            day: reference.day(),
            hour: reference.hour(),
            minute: reference.minute(),
            second: reference.second(),
        }
    }

    /// Materialize the accumulated fields.
    ///
    /// Returns `None` if the fields do not form a real calendar date/time.
    /// The built-in grammar validates before writing, so `None` here means
    /// the fields were set by hand to something impossible.
    pub fn build(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }
}

impl DateTimeBuilder for NaiveDateTimeBuilder {
    fn year(&self) -> i32 {
        self.year
    }
    fn month(&self) -> u32 {
        self.month
    }
    fn day(&self) -> u32 {
        self.day
    }
    fn hour(&self) -> u32 {
        self.hour
    }
    fn minute(&self) -> u32 {
        self.minute
    }
    fn second(&self) -> u32 {
        self.second
    }

    fn set_year(&mut self, year: i32) {
        self.year = year;
    }
    fn set_month(&mut self, month: u32) {
        self.month = month;
    }
    fn set_day(&mut self, day: u32) {
        self.day = day;
    }
    fn set_hour(&mut self, hour: u32) {
        self.hour = hour;
    }
    fn set_minute(&mut self, minute: u32) {
        self.minute = minute;
    }
    fn set_second(&mut self, second: u32) {
        self.second = second;
    }
}

// ── TimeDeltaBuilder ────────────────────────────────────────────────────────

/// The built-in magnitude accumulator, materializing a [`TimeDelta`].
///
/// Resolution is calendar-aware and order-dependent: years and months step
/// the reference instant through the calendar one unit at a time
/// (respecting variable month and year lengths), fractional remainders
/// convert into the next-smaller unit using the *resulting* month's day
/// count, and day-and-smaller magnitudes are straight decimal arithmetic.
/// "2 years" from a leap-year reference therefore spans a different absolute
/// length than from a non-leap one.
#[derive(Debug, Clone)]
pub struct TimeDeltaBuilder {
    reference: NaiveDateTime,
    years: Decimal,
    months: Decimal,
    days: Decimal,
    hours: Decimal,
    minutes: Decimal,
    seconds: Decimal,
}

impl TimeDeltaBuilder {
    /// Create a zero-magnitude builder anchored at `reference`.
    pub fn new(reference: NaiveDateTime) -> Self {
        Self {
            reference,
            years: Decimal::ZERO,
            months: Decimal::ZERO,
            days: Decimal::ZERO,
            hours: Decimal::ZERO,
            minutes: Decimal::ZERO,
            seconds: Decimal::ZERO,
        }
    }

    /// Resolve the magnitudes into the elapsed span they denote from the
    /// reference instant.
    ///
    /// Returns `None` if the walk leaves the representable calendar range.
    pub fn build(&self) -> Option<TimeDelta> {
        let mut instant = self.reference;
        instant = add_years(instant, self.years)?;
        instant = add_months(instant, self.months)?;

        let seconds = self.days * Decimal::from(86_400u32)
            + self.hours * Decimal::from(3_600u32)
            + self.minutes * Decimal::from(60u32)
            + self.seconds;
        instant = instant.checked_add_signed(delta_from_seconds(seconds)?)?;

        Some(instant - self.reference)
    }
}

impl DurationBuilder for TimeDeltaBuilder {
    fn years(&self) -> Decimal {
        self.years
    }
    fn months(&self) -> Decimal {
        self.months
    }
    fn days(&self) -> Decimal {
        self.days
    }
    fn hours(&self) -> Decimal {
        self.hours
    }
    fn minutes(&self) -> Decimal {
        self.minutes
    }
    fn seconds(&self) -> Decimal {
        self.seconds
    }

    fn set_years(&mut self, years: Decimal) {
        self.years = years;
    }
    fn set_months(&mut self, months: Decimal) {
        self.months = months;
    }
    fn set_days(&mut self, days: Decimal) {
        self.days = days;
    }
    fn set_hours(&mut self, hours: Decimal) {
        self.hours = hours;
    }
    fn set_minutes(&mut self, minutes: Decimal) {
        self.minutes = minutes;
    }
    fn set_seconds(&mut self, seconds: Decimal) {
        self.seconds = seconds;
    }
}

/// Add decimal years: whole years one calendar year at a time, then the
/// fractional remainder as months.
fn add_years(mut instant: NaiveDateTime, mut magnitude: Decimal) -> Option<NaiveDateTime> {
    while magnitude >= Decimal::ONE {
        instant = instant.checked_add_months(Months::new(12))?;
        magnitude -= Decimal::ONE;
    }
    add_months(instant, magnitude * Decimal::from(12u32))
}

/// Add decimal months: whole months one calendar month at a time, then the
/// fractional remainder as days scaled by the resulting month's day count.
fn add_months(mut instant: NaiveDateTime, mut magnitude: Decimal) -> Option<NaiveDateTime> {
    while magnitude >= Decimal::ONE {
        instant = instant.checked_add_months(Months::new(1))?;
        magnitude -= Decimal::ONE;
    }
    let days = magnitude * Decimal::from(days_in_month(instant.year(), instant.month())?);
    instant.checked_add_signed(delta_from_seconds(days * Decimal::from(86_400u32))?)
}

/// Convert decimal seconds to a [`TimeDelta`] with nanosecond precision.
fn delta_from_seconds(seconds: Decimal) -> Option<TimeDelta> {
    let whole = seconds.trunc().to_i64()?;
    let nanos = (seconds.fract() * Decimal::from(1_000_000_000u32))
        .trunc()
        .to_i64()?;
    TimeDelta::try_seconds(whole)?.checked_add(&TimeDelta::nanoseconds(nanos))
}

/// Day count of `(year, month)`, leap years included.
pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}

// ── Tests ───────────────────────────────────────────────────────────────────
