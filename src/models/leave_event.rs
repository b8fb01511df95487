//! Canonical leave event model.
//!
//! This module defines [`LeaveEvent`], the enriched form of one raw leave
//! record, together with its temporal [`EventStatus`] and [`UrgencyTier`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Temporal status of a leave event relative to the batch reference date.
///
/// Statuses are recomputed on every enrichment pass; none is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// The event has not started yet.
    Scheduled,
    /// The reference date falls within the event.
    Active,
    /// The event is over and no balance remains.
    Expired,
    /// The event is over but the source still reports remaining days.
    ExpiredWithBalance,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Scheduled => write!(f, "Scheduled"),
            EventStatus::Active => write!(f, "Active"),
            EventStatus::Expired => write!(f, "Expired"),
            EventStatus::ExpiredWithBalance => write!(f, "Expired with balance"),
        }
    }
}

/// Priority classification driven by the days remaining until an event
/// starts.
///
/// Variants are declared in ascending alerting severity, so `Ord` gives the
/// roll-up order directly: `Critical > High > Moderate > Low > Active >
/// Expired > Undefined`. `Active` ranks low because the servant is already
/// on leave.
///
/// # Example
///
/// ```
/// use premium_leave_engine::models::UrgencyTier;
///
/// let worst = [UrgencyTier::Low, UrgencyTier::Critical, UrgencyTier::Active]
///     .into_iter()
///     .max();
/// assert_eq!(worst, Some(UrgencyTier::Critical));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    /// No anchor date to measure from.
    Undefined,
    /// The event started in the past and is over.
    Expired,
    /// The event started in the past and is still running.
    Active,
    /// More than the moderate threshold away.
    Low,
    /// Within the moderate threshold (61–90 days by default).
    Moderate,
    /// Within the high threshold (31–60 days by default).
    High,
    /// Within the critical threshold (0–30 days by default).
    Critical,
}

impl std::fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrgencyTier::Undefined => write!(f, "Undefined"),
            UrgencyTier::Expired => write!(f, "Expired"),
            UrgencyTier::Active => write!(f, "Active"),
            UrgencyTier::Low => write!(f, "Low"),
            UrgencyTier::Moderate => write!(f, "Moderate"),
            UrgencyTier::High => write!(f, "High"),
            UrgencyTier::Critical => write!(f, "Critical"),
        }
    }
}

/// An enriched leave event.
///
/// Events without a usable start date are dropped during enrichment, so
/// `start` and `end` are always present here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEvent {
    /// First day of leave.
    pub start: NaiveDate,
    /// Last day of leave (inclusive). Derived as `start + days - 1` when the
    /// source omits it.
    pub end: NaiveDate,
    /// Kind of leave (source value or the configured default).
    pub kind: String,
    /// Free-text description from the source.
    pub description: String,
    /// Duration in days.
    pub days: u32,
    /// Days consumed by this event. Always equal to `days`.
    pub days_consumed: u32,
    /// Consumption figure recorded by the source, kept for audit.
    pub recorded_consumed: Option<u32>,
    /// Duration in months.
    pub months: u32,
    /// Balance text as supplied by the source.
    pub balance_raw: String,
    /// Balance in days parsed from `balance_raw`.
    pub balance_days: u32,
    /// Acquisitive window start, when the source names one.
    pub window_start: Option<NaiveDate>,
    /// Acquisitive window end, when the source names one.
    pub window_end: Option<NaiveDate>,
    /// Temporal status against the batch reference date.
    pub status: EventStatus,
    /// Urgency tier against the batch reference date.
    pub urgency: UrgencyTier,
    /// Signed days from the reference date to `start`.
    pub days_until_start: i64,
}

impl LeaveEvent {
    /// Returns true when the source recorded a consumption figure that
    /// disagrees with the span-derived `days_consumed`.
    pub fn has_consumption_mismatch(&self) -> bool {
        self.recorded_consumed
            .is_some_and(|recorded| recorded != self.days_consumed)
    }

    /// Returns true if the event carries any explicit window bound.
    pub fn has_window_metadata(&self) -> bool {
        self.window_start.is_some() || self.window_end.is_some()
    }

    /// Returns true if `date` falls within the event (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
