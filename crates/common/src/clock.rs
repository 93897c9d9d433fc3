//! Calendar date source for the composite date stamp.
//!
//! The compositor never reads the wall clock itself. Callers obtain the
//! date from a [`DateClock`] and pass it in, so composition stays a pure
//! function of its inputs and tests can pin the date.

use chrono::{Local, NaiveDate};

/// Format used for the printed date stamp.
pub const DATE_STAMP_FORMAT: &str = "%Y-%m-%d";

/// Source of "today" for stamping composites.
pub trait DateClock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;

    /// The current date rendered as `YYYY-MM-DD`.
    fn stamp(&self) -> String {
        format_stamp(self.today())
    }
}

/// Wall clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl DateClock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl DateClock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_stamp(date: NaiveDate) -> String {
    date.format(DATE_STAMP_FORMAT).to_string()
}
