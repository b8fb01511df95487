//! Urgency tier classification.
//!
//! Urgency is driven by the signed number of days from the batch reference
//! date to an event's start. Events already under way or finished fall into
//! the low-priority `Active` and `Expired` tiers.

use chrono::NaiveDate;

use crate::config::UrgencyThresholds;
use crate::models::{EventStatus, UrgencyTier};

/// Signed days from `today` to `start` (negative once the event has begun).
pub fn days_until(start: NaiveDate, today: NaiveDate) -> i64 {
    (start - today).num_days()
}

/// Classifies an event's urgency.
///
/// | days until start            | tier       |
/// |-----------------------------|------------|
/// | absent start                | `Undefined`|
/// | `< 0`, status active        | `Active`   |
/// | `< 0`, otherwise            | `Expired`  |
/// | `0 ..= critical_days`       | `Critical` |
/// | `..= high_days`             | `High`     |
/// | `..= moderate_days`         | `Moderate` |
/// | beyond                      | `Low`      |
///
/// # Example
///
/// ```
/// use premium_leave_engine::config::UrgencyThresholds;
/// use premium_leave_engine::enrichment::classify_urgency;
/// use premium_leave_engine::models::{EventStatus, UrgencyTier};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let start = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
/// let tier = classify_urgency(
///     Some(start),
///     EventStatus::Scheduled,
///     today,
///     &UrgencyThresholds::default(),
/// );
/// assert_eq!(tier, UrgencyTier::Critical);
/// ```
pub fn classify_urgency(
    start: Option<NaiveDate>,
    status: EventStatus,
    today: NaiveDate,
    thresholds: &UrgencyThresholds,
) -> UrgencyTier {
    let Some(start) = start else {
        return UrgencyTier::Undefined;
    };

    let days = days_until(start, today);
    if days < 0 {
        return if status == EventStatus::Active {
            UrgencyTier::Active
        } else {
            UrgencyTier::Expired
        };
    }

    if days <= thresholds.critical_days {
        UrgencyTier::Critical
    } else if days <= thresholds.high_days {
        UrgencyTier::High
    } else if days <= thresholds.moderate_days {
        UrgencyTier::Moderate
    } else {
        UrgencyTier::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn tier_in(days: i64, status: EventStatus) -> UrgencyTier {
        classify_urgency(
            Some(today() + Duration::days(days)),
            status,
            today(),
            &UrgencyThresholds::default(),
        )
    }

    /// UR-001: ten days out is critical
    #[test]
    fn test_ur_001_ten_days_out_is_critical() {
        assert_eq!(tier_in(10, EventStatus::Scheduled), UrgencyTier::Critical);
    }

    /// UR-002: tier boundaries are inclusive
    #[test]
    fn test_ur_002_tier_boundaries() {
        assert_eq!(tier_in(0, EventStatus::Active), UrgencyTier::Critical);
        assert_eq!(tier_in(30, EventStatus::Scheduled), UrgencyTier::Critical);
        assert_eq!(tier_in(31, EventStatus::Scheduled), UrgencyTier::High);
        assert_eq!(tier_in(60, EventStatus::Scheduled), UrgencyTier::High);
        assert_eq!(tier_in(61, EventStatus::Scheduled), UrgencyTier::Moderate);
        assert_eq!(tier_in(90, EventStatus::Scheduled), UrgencyTier::Moderate);
        assert_eq!(tier_in(91, EventStatus::Scheduled), UrgencyTier::Low);
    }

    /// UR-003: started events split on status
    #[test]
    fn test_ur_003_started_events() {
        assert_eq!(tier_in(-5, EventStatus::Active), UrgencyTier::Active);
        assert_eq!(tier_in(-5, EventStatus::Expired), UrgencyTier::Expired);
        assert_eq!(
            tier_in(-5, EventStatus::ExpiredWithBalance),
            UrgencyTier::Expired
        );
    }

    /// UR-004: no anchor, no urgency
    #[test]
    fn test_ur_004_absent_start_is_undefined() {
        let tier = classify_urgency(
            None,
            EventStatus::Scheduled,
            today(),
            &UrgencyThresholds::default(),
        );
        assert_eq!(tier, UrgencyTier::Undefined);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = UrgencyThresholds {
            critical_days: 7,
            high_days: 14,
            moderate_days: 21,
        };
        let tier = classify_urgency(
            Some(today() + Duration::days(10)),
            EventStatus::Scheduled,
            today(),
            &thresholds,
        );
        assert_eq!(tier, UrgencyTier::High);
    }

    #[test]
    fn test_days_until_is_signed() {
        assert_eq!(days_until(today() + Duration::days(3), today()), 3);
        assert_eq!(days_until(today() - Duration::days(3), today()), -3);
    }
}
