//! Multi-format date normalisation.
//!
//! Source spreadsheets mix typed dates, ISO text, Brazilian `DD/MM/YYYY`,
//! bare `MM/YYYY` and month names. [`DateNormalizer`] tries an ordered list
//! of [`DateStrategy`]s and returns the first calendar date produced.
//! Nothing here panics on bad input; unrecognised values become `None`.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::models::{RawValue, canonical_key};

/// One named way of reading a date out of a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateStrategy {
    /// The value is already a typed date or date-time.
    Calendar,
    /// Text starting with `YYYY-MM-DD`, optionally followed by a time.
    IsoPrefix,
    /// Text starting with `DD/MM/YYYY` (`/`, `-` or `.` separators).
    DayMonthYear,
    /// Text that is exactly `MM/YYYY` or `YYYY-MM`; resolves to the first of
    /// the month.
    MonthYear,
    /// Month name and year (`"março/2025"`, `"Jan 2024"`, `"Março de 2025"`),
    /// optionally led by a day (`"15 de março de 2025"`). Without a day it
    /// resolves to the first of the month.
    MonthNameYear,
    /// Common textual formats: RFC 3339, RFC 2822, `YYYY/MM/DD`,
    /// `15 March 2025`, `March 15, 2025`. Years must have four digits.
    Generic,
}

impl DateStrategy {
    /// The standard priority order.
    ///
    /// Full day/month/year patterns come before the shorter month/year
    /// pattern so `15/03/2025` is never read as a month.
    pub const STANDARD: [DateStrategy; 6] = [
        DateStrategy::Calendar,
        DateStrategy::IsoPrefix,
        DateStrategy::DayMonthYear,
        DateStrategy::MonthYear,
        DateStrategy::MonthNameYear,
        DateStrategy::Generic,
    ];

    /// A stable name for logs and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            DateStrategy::Calendar => "calendar",
            DateStrategy::IsoPrefix => "iso_prefix",
            DateStrategy::DayMonthYear => "day_month_year",
            DateStrategy::MonthYear => "month_year",
            DateStrategy::MonthNameYear => "month_name_year",
            DateStrategy::Generic => "generic",
        }
    }

    /// Applies this strategy alone to `value`.
    pub fn attempt(self, value: &RawValue) -> Option<NaiveDate> {
        if self == DateStrategy::Calendar {
            return match value {
                RawValue::Date(date) => Some(*date),
                RawValue::DateTime(datetime) => Some(datetime.date()),
                _ => None,
            };
        }

        let RawValue::Text(text) = value else {
            return None;
        };
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        match self {
            DateStrategy::Calendar => None,
            DateStrategy::IsoPrefix => parse_iso_prefix(text),
            DateStrategy::DayMonthYear => parse_day_month_year(text),
            DateStrategy::MonthYear => parse_month_year(text),
            DateStrategy::MonthNameYear => parse_month_name_year(text),
            DateStrategy::Generic => parse_generic(text),
        }
    }
}

impl std::fmt::Display for DateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts raw values into calendar dates through an ordered strategy list.
///
/// # Example
///
/// ```
/// use premium_leave_engine::enrichment::DateNormalizer;
/// use premium_leave_engine::models::RawValue;
/// use chrono::NaiveDate;
///
/// let normalizer = DateNormalizer::new();
/// assert_eq!(
///     normalizer.normalize(&RawValue::from("15/03/2025")),
///     NaiveDate::from_ymd_opt(2025, 3, 15)
/// );
/// assert_eq!(
///     normalizer.normalize(&RawValue::from("março/2025")),
///     NaiveDate::from_ymd_opt(2025, 3, 1)
/// );
/// assert_eq!(normalizer.normalize(&RawValue::from("not a date")), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateNormalizer {
    strategies: Vec<DateStrategy>,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self {
            strategies: DateStrategy::STANDARD.to_vec(),
        }
    }
}

impl DateNormalizer {
    /// Creates a normalizer with the standard strategy order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer that tries exactly `strategies`, in order.
    pub fn with_strategies(strategies: Vec<DateStrategy>) -> Self {
        Self { strategies }
    }

    /// The strategies tried, in order.
    pub fn strategies(&self) -> &[DateStrategy] {
        &self.strategies
    }

    /// Returns the first date any strategy produces, or `None`.
    pub fn normalize(&self, value: &RawValue) -> Option<NaiveDate> {
        self.normalize_with_strategy(value).map(|(date, _)| date)
    }

    /// Like [`normalize`](Self::normalize), also reporting which strategy
    /// matched.
    pub fn normalize_with_strategy(&self, value: &RawValue) -> Option<(NaiveDate, DateStrategy)> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.attempt(value).map(|date| (date, *strategy)))
    }

    /// Convenience wrapper for text input.
    pub fn normalize_text(&self, text: &str) -> Option<NaiveDate> {
        self.normalize(&RawValue::Text(text.to_string()))
    }
}

struct DatePatterns {
    iso_prefix: Regex,
    day_month_year: Regex,
    month_year: Regex,
    year_month: Regex,
    month_name_year: Regex,
}

impl DatePatterns {
    fn new() -> Self {
        Self {
            // 2025-03-15, 2025-03-15 14:30:00, 2025-03-15T14:30:00Z
            iso_prefix: Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:\D|$)")
                .expect("valid ISO date pattern"),
            // 15/03/2025, 15-03-2025, 15.03.2025 14:30
            day_month_year: Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})(?:\D|$)")
                .expect("valid day/month/year pattern"),
            // 03/2025
            month_year: Regex::new(r"^(\d{1,2})[/.\-](\d{4})$")
                .expect("valid month/year pattern"),
            // 2025-03, 2025/03
            year_month: Regex::new(r"^(\d{4})[/\-](\d{1,2})$").expect("valid year/month pattern"),
            // MARCO/2025, JAN 2024, 15 DE MARCO DE 2025 (matched against canonical text)
            month_name_year: Regex::new(
                r"^(?:(\d{1,2})\s*(?:/\s*|\s+)(?:DE\s+)?)?([A-Z]{3,})\s*(?:/\s*|\s+)(?:DE\s+)?(\d{4})$",
            )
            .expect("valid month-name/year pattern"),
        }
    }
}

fn patterns() -> &'static DatePatterns {
    static PATTERNS: OnceLock<DatePatterns> = OnceLock::new();
    PATTERNS.get_or_init(DatePatterns::new)
}

const MONTH_NAMES: [[&str; 2]; 12] = [
    ["JANEIRO", "JANUARY"],
    ["FEVEREIRO", "FEBRUARY"],
    ["MARCO", "MARCH"],
    ["ABRIL", "APRIL"],
    ["MAIO", "MAY"],
    ["JUNHO", "JUNE"],
    ["JULHO", "JULY"],
    ["AGOSTO", "AUGUST"],
    ["SETEMBRO", "SEPTEMBER"],
    ["OUTUBRO", "OCTOBER"],
    ["NOVEMBRO", "NOVEMBER"],
    ["DEZEMBRO", "DECEMBER"],
];

const GENERIC_DATE_FORMATS: [&str; 8] = [
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

const MIN_GENERIC_YEAR: i32 = 1000;

const GENERIC_DATETIME_FORMATS: [&str; 2] = ["%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M"];

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn parse_iso_prefix(text: &str) -> Option<NaiveDate> {
    let caps = patterns().iso_prefix.captures(text)?;
    ymd(&caps[1], &caps[2], &caps[3])
}

fn parse_day_month_year(text: &str) -> Option<NaiveDate> {
    let caps = patterns().day_month_year.captures(text)?;
    ymd(&caps[3], &caps[2], &caps[1])
}

fn parse_month_year(text: &str) -> Option<NaiveDate> {
    let patterns = patterns();
    if let Some(caps) = patterns.month_year.captures(text) {
        return ymd(&caps[2], &caps[1], "1");
    }
    let caps = patterns.year_month.captures(text)?;
    ymd(&caps[1], &caps[2], "1")
}

fn parse_month_name_year(text: &str) -> Option<NaiveDate> {
    let canonical = canonical_key(text);
    let caps = patterns().month_name_year.captures(&canonical)?;
    let day = caps.get(1).map_or(Some(1), |day| day.as_str().parse().ok())?;
    let month = month_from_name(&caps[2])?;
    NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, day)
}

/// Resolves a canonical (upper-case, unaccented) month name or abbreviation
/// of at least three letters, in Portuguese or English.
fn month_from_name(name: &str) -> Option<u32> {
    if name.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|names| names.iter().any(|full| full.starts_with(name)))
        .map(|index| index as u32 + 1)
}

fn parse_generic(text: &str) -> Option<NaiveDate> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc2822(text) {
        return Some(datetime.date_naive());
    }

    // chrono's %Y also accepts short years, so "15/03/25" would otherwise
    // come back as 0015-03-25.
    GENERIC_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            GENERIC_DATETIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(text, format)
                    .ok()
                    .map(|datetime| datetime.date())
            })
        })
        .filter(|date| date.year() >= MIN_GENERIC_YEAR)
}
