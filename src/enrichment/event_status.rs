//! Temporal status classification.

use chrono::NaiveDate;

use crate::models::EventStatus;

/// Classifies an event against the batch reference date.
///
/// - `Scheduled` if `today < start`
/// - `Active` if `start <= today <= end`
/// - `Expired` if `today > end` and no balance remains
/// - `ExpiredWithBalance` if `today > end` and the source reports a balance
///
/// # Example
///
/// ```
/// use premium_leave_engine::enrichment::classify_status;
/// use premium_leave_engine::models::EventStatus;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
/// assert_eq!(classify_status(start, end, 0, today), EventStatus::Active);
/// ```
pub fn classify_status(
    start: NaiveDate,
    end: NaiveDate,
    balance_days: u32,
    today: NaiveDate,
) -> EventStatus {
    if today < start {
        EventStatus::Scheduled
    } else if today <= end {
        EventStatus::Active
    } else if balance_days > 0 {
        EventStatus::ExpiredWithBalance
    } else {
        EventStatus::Expired
    }
}
