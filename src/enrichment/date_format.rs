//! Date rendering for display-facing fields.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::config::DisplaySettings;

const FALLBACK_PATTERN: &str = "%d/%m/%Y";

/// Renders calendar dates with a fixed pattern.
///
/// # Example
///
/// ```
/// use premium_leave_engine::enrichment::DateFormatter;
/// use chrono::NaiveDate;
///
/// let formatter = DateFormatter::default();
/// let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
/// assert_eq!(formatter.format(date), "15/03/2025");
/// assert_eq!(formatter.format_optional(None), "-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    pattern: String,
    missing: String,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(FALLBACK_PATTERN, "-")
    }
}

impl DateFormatter {
    /// Creates a formatter from a chrono pattern and an absent-date placeholder.
    pub fn new(pattern: impl Into<String>, missing: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            missing: missing.into(),
        }
    }

    /// Creates a formatter from the display settings.
    pub fn from_settings(display: &DisplaySettings) -> Self {
        Self::new(display.date_pattern.clone(), display.missing_date.clone())
    }

    /// Renders `date`. An unusable pattern falls back to `dd/mm/yyyy`.
    pub fn format(&self, date: NaiveDate) -> String {
        let mut rendered = String::new();
        match write!(rendered, "{}", date.format(&self.pattern)) {
            Ok(()) => rendered,
            Err(_) => date.format(FALLBACK_PATTERN).to_string(),
        }
    }

    /// Renders `date`, or the placeholder when absent.
    pub fn format_optional(&self, date: Option<NaiveDate>) -> String {
        date.map_or_else(|| self.missing.clone(), |d| self.format(d))
    }
}
