//! Acquisitive window model.
//!
//! An acquisitive window is the service period during which one quota of
//! premium leave accrues.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Where a window's boundaries came from.
///
/// Callers can use this to warn users when balances rest on placeholders
/// rather than on recorded window metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Boundaries recorded on the servant's leave events.
    Recorded,
    /// The next cycle following the latest recorded window.
    Projected,
    /// One-year placeholder generated when no window metadata exists.
    Synthetic,
}

/// One entitlement window with its quota and balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitiveWindow {
    /// Year span label, e.g. `"2020-2024"` (or `"2025"` for a one-year window).
    pub label: String,
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
    /// Origin of the boundaries.
    pub kind: WindowKind,
    /// Days granted by the window.
    pub quota_generated: u32,
    /// Days consumed against the window.
    pub days_consumed: u32,
    /// `max(0, quota_generated - days_consumed)`.
    pub days_available: u32,
    /// True when the window ended before the reference date.
    pub is_expired: bool,
    /// Number of events attributed to the window.
    pub event_count: usize,
}

impl AcquisitiveWindow {
    /// Builds a window, deriving its label, balance and expiry.
    ///
    /// # Example
    ///
    /// ```
    /// use premium_leave_engine::models::{AcquisitiveWindow, WindowKind};
    /// use chrono::NaiveDate;
    ///
    /// let window = AcquisitiveWindow::new(
    ///     WindowKind::Recorded,
    ///     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    ///     90,
    ///     60,
    ///     2,
    ///     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    /// );
    /// assert_eq!(window.label, "2020-2024");
    /// assert_eq!(window.days_available, 30);
    /// assert!(window.is_expired);
    /// ```
    pub fn new(
        kind: WindowKind,
        start: NaiveDate,
        end: NaiveDate,
        quota_generated: u32,
        days_consumed: u32,
        event_count: usize,
        today: NaiveDate,
    ) -> Self {
        let label = if start.year() == end.year() {
            start.year().to_string()
        } else {
            format!("{}-{}", start.year(), end.year())
        };

        Self {
            label,
            start,
            end,
            kind,
            quota_generated,
            days_consumed,
            days_available: quota_generated.saturating_sub(days_consumed),
            is_expired: end < today,
            event_count,
        }
    }

    /// Returns true if `date` falls within the window (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if the two windows share at least one day.
    pub fn overlaps(&self, other: &AcquisitiveWindow) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns true for placeholder windows.
    pub fn is_synthetic(&self) -> bool {
        self.kind == WindowKind::Synthetic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn window(start: &str, end: &str, consumed: u32) -> AcquisitiveWindow {
        AcquisitiveWindow::new(
            WindowKind::Recorded,
            make_date(start),
            make_date(end),
            90,
            consumed,
            0,
            make_date("2025-06-01"),
        )
    }

    #[test]
    fn test_available_never_negative() {
        let over = window("2020-01-01", "2024-12-31", 120);
        assert_eq!(over.days_available, 0);
    }

    #[test]
    fn test_single_year_label() {
        let w = AcquisitiveWindow::new(
            WindowKind::Synthetic,
            make_date("2025-01-01"),
            make_date("2025-12-31"),
            90,
            0,
            0,
            make_date("2025-06-01"),
        );
        assert_eq!(w.label, "2025");
        assert!(w.is_synthetic());
        assert!(!w.is_expired);
    }

    #[test]
    fn test_expiry_is_strictly_before_reference() {
        let ends_today = AcquisitiveWindow::new(
            WindowKind::Recorded,
            make_date("2020-06-02"),
            make_date("2025-06-01"),
            90,
            0,
            0,
            make_date("2025-06-01"),
        );
        assert!(!ends_today.is_expired);
    }

    #[test]
    fn test_overlap_detection() {
        let a = window("2015-01-01", "2019-12-31", 0);
        let b = window("2020-01-01", "2024-12-31", 0);
        let c = window("2018-01-01", "2022-12-31", 0);

        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_window_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&WindowKind::Projected).unwrap(),
            "\"projected\""
        );
    }
}
