//! Calendar arithmetic and date formatting.
//!
//! Offsets are whole calendar days between a target date and "today" in the
//! local calendar. Both sides are plain dates, so time of day never leaks
//! into the result and month lengths come from the calendar itself.

use std::{cell::Cell, fmt};

use chrono::{DateTime, Duration, Local, Locale, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{DdayError, Result};

/// Marker shown when the target date is today.
pub const TODAY_MARKER: &str = "D-Day";
/// Prefix for dates still ahead, followed by the number of days left.
pub const FUTURE_MARKER: &str = "D-";
/// Prefix for dates already gone, followed by the number of days since.
pub const PAST_MARKER: &str = "D+";

/// Source of "today" and "now".
///
/// Derived views ask the clock on every read, so a store kept open across
/// midnight re-partitions its events without any cache invalidation.
pub trait Clock {
    /// The current calendar date in the user's local time zone.
    fn today(&self) -> NaiveDate;

    /// The current instant, used for creation timestamps and ids.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a given day; it only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
            now: Cell::new(Utc.from_utc_datetime(&today.and_time(NaiveTime::MIN))),
        }
    }

    /// Moves both "today" and "now" by whole days (negative goes back).
    pub fn advance_days(&self, days: i64) {
        self.today.set(self.today.get() + Duration::days(days));
        self.now.set(self.now.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Language used for human-readable dates and screen labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLocale {
    #[default]
    En,
    Ko,
}

impl DisplayLocale {
    fn chrono_locale(self) -> Locale {
        match self {
            DisplayLocale::En => Locale::en_US,
            DisplayLocale::Ko => Locale::ko_KR,
        }
    }

    fn long_pattern(self) -> &'static str {
        match self {
            DisplayLocale::En => "%A, %B %-d, %Y",
            DisplayLocale::Ko => "%Y년 %-m월 %-d일 (%a)",
        }
    }

    fn short_pattern(self) -> &'static str {
        "%-m/%-d (%a)"
    }
}

impl fmt::Display for DisplayLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayLocale::En => write!(f, "en"),
            DisplayLocale::Ko => write!(f, "ko"),
        }
    }
}

/// Where a date sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStatus {
    Today,
    Past,
    Future,
}

impl DateStatus {
    pub fn from_offset(days: i64) -> Self {
        match days {
            0 => DateStatus::Today,
            d if d < 0 => DateStatus::Past,
            _ => DateStatus::Future,
        }
    }
}

/// Parses a `YYYY-MM-DD` date. A full ISO timestamp is accepted too, in
/// which case only its date part is used.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let date_part = trimmed.split_once('T').map_or(trimmed, |(date, _)| date);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|source| DdayError::DateParse {
        input: input.to_string(),
        source,
    })
}

/// Signed number of calendar days from `today` to `date`.
pub fn days_between(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

/// Signed number of days from today (local calendar) to the given date string.
pub fn day_offset(date: &str) -> Result<i64> {
    let date = parse_date(date)?;
    Ok(days_between(date, SystemClock.today()))
}

/// Renders an offset as a D-Day marker: `D-Day`, `D-5` or `D+3`.
pub fn format_offset(days: i64) -> String {
    match days {
        0 => TODAY_MARKER.to_string(),
        d if d > 0 => format!("{}{}", FUTURE_MARKER, d),
        d => format!("{}{}", PAST_MARKER, d.unsigned_abs()),
    }
}

/// Long form with weekday and full year, e.g. `Sunday, October 18, 2026`.
pub fn long_date(date: NaiveDate, locale: DisplayLocale) -> String {
    localized(date, locale.long_pattern(), locale)
}

/// Compact month/day with weekday, e.g. `10/18 (Sun)`.
pub fn short_date(date: NaiveDate, locale: DisplayLocale) -> String {
    localized(date, locale.short_pattern(), locale)
}

pub fn format_long_date(date: &str, locale: DisplayLocale) -> Result<String> {
    Ok(long_date(parse_date(date)?, locale))
}

pub fn format_short_date(date: &str, locale: DisplayLocale) -> Result<String> {
    Ok(short_date(parse_date(date)?, locale))
}

fn localized(date: NaiveDate, pattern: &str, locale: DisplayLocale) -> String {
    // Localized formatting lives on DateTime; midnight UTC keeps the day intact.
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .format_localized(pattern, locale.chrono_locale())
        .to_string()
}
