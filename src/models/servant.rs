//! Per-servant aggregate model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AcquisitiveWindow, EnrichmentWarning, LeaveEvent, UrgencyTier};

/// The fully enriched rollup of one servant's events and windows.
///
/// Built once per enrichment pass and not mutated afterwards. Every numeric
/// rollup is a non-negative integer, every date is valid or absent, and
/// `assignment` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServantAggregate {
    /// Registration number, when the source provides one.
    pub id: Option<String>,
    /// Display name (empty when the source omits it).
    pub name: String,
    /// Display-formatted assignment (lotação), always populated.
    pub assignment: String,
    /// Enriched events, ordered by start date.
    pub events: Vec<LeaveEvent>,
    /// Acquisitive windows, ordered by start date and non-overlapping.
    pub windows: Vec<AcquisitiveWindow>,
    /// Number of events that survived enrichment.
    pub total_events: usize,
    /// Sum of `days_consumed` across events.
    pub total_days_consumed: u32,
    /// Sum of quota across all windows.
    pub total_quota: u32,
    /// `max(0, total_quota - total_days_consumed)`.
    pub total_days_available: u32,
    /// Most severe urgency tier across events.
    pub worst_urgency: UrgencyTier,
    /// Earliest event start.
    pub next_event_start: Option<NaiveDate>,
    /// `next_event_start` rendered for display.
    pub next_event_display: String,
    /// Earliest event start on or after the reference date.
    pub upcoming_event_start: Option<NaiveDate>,
    /// Number of events whose recorded consumption disagrees with their span.
    pub consumption_mismatches: usize,
    /// Data issues recovered while building the aggregate.
    pub warnings: Vec<EnrichmentWarning>,
}

impl ServantAggregate {
    /// Returns true when the windows are placeholders rather than recorded
    /// entitlement history.
    pub fn uses_synthetic_windows(&self) -> bool {
        self.windows.iter().any(AcquisitiveWindow::is_synthetic)
    }

    /// Returns true if any data issue was recovered for this servant.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
