//! # timeprose
//!
//! Backtracking parser for human-written dates, times, and durations.
//!
//! Given a string like `"11/10/78"`, `"Sep 2002"`, `"3:45 PM"`, or
//! `"2y 6mo"` and a reference instant, timeprose resolves it into a concrete
//! [`chrono::NaiveDateTime`] or [`chrono::TimeDelta`]. Whatever the input
//! does not specify falls back to the reference: a bare `"12"` is the 12th
//! of the reference month, `"3 AM"` is 3 o'clock on the reference day.
//!
//! # Design Principle
//!
//! Parsing is all-or-nothing. Every supported shape is tried in a fixed
//! priority order against the same token stream, and an alternative only
//! wins by consuming the entire input and producing a calendrically valid
//! result — otherwise the caller gets an error and nothing else, never a
//! half-parsed date. There is no system clock access anywhere: the caller
//! provides the reference instant, keeping every call pure, deterministic,
//! and safe to run from any number of threads at once.
//!
//! # Modules
//!
//! - [`token`] — Classifier: raw text → token sequence
//! - [`cursor`] — Replayable cursor with O(1) checkpoint/rollback
//! - [`builder`] — Field accumulators (absolute date/time and decimal
//!   duration magnitudes) and the traits for supplying your own
//! - [`parser`] — `parse_datetime` / `parse_duration` entry points
//! - [`error`] — Error types
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use timeprose::parse_datetime;
//!
//! let reference = NaiveDate::from_ymd_opt(1978, 9, 10)
//!     .unwrap()
//!     .and_hms_opt(14, 30, 10)
//!     .unwrap();
//!
//! // A date without a time means midnight; the two-digit year windows
//! // into the 2000s.
//! let parsed = parse_datetime("11/10/78", reference).unwrap();
//! assert_eq!(parsed.to_string(), "2078-10-11 00:00:00");
//!
//! // A time without a date stays on the reference day.
//! let parsed = parse_datetime("10:20:30 pm", reference).unwrap();
//! assert_eq!(parsed.to_string(), "1978-09-10 22:20:30");
//! ```

pub mod builder;
pub mod cursor;
pub mod error;
pub mod parser;
pub mod token;

mod date;
mod duration;
mod time;

pub use builder::{DateTimeBuilder, DurationBuilder, NaiveDateTimeBuilder, TimeDeltaBuilder};
pub use error::{ParseError, Result};
pub use parser::{parse_datetime, parse_datetime_into, parse_duration, parse_duration_into};
pub use token::{tokenize, Token, TokenKind};
