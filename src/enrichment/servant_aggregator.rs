//! Per-servant aggregation.
//!
//! This module composes event enrichment, window reconstruction and
//! assignment resolution into one [`ServantAggregate`] per servant.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::EngineSettings;
use crate::models::{RawServant, ServantAggregate, UrgencyTier};

use super::assignment::resolve_assignment;
use super::date_format::DateFormatter;
use super::date_normalizer::DateNormalizer;
use super::event_enricher::LeaveEventEnricher;
use super::window_calculator::calculate_windows;

/// Builds servant aggregates against a fixed reference date.
///
/// # Example
///
/// ```
/// use premium_leave_engine::config::EngineSettings;
/// use premium_leave_engine::enrichment::{DateFormatter, DateNormalizer, ServantAggregator};
/// use premium_leave_engine::models::{RawRecord, RawServant, UrgencyTier};
/// use chrono::NaiveDate;
///
/// let settings = EngineSettings::default();
/// let normalizer = DateNormalizer::new();
/// let formatter = DateFormatter::default();
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let aggregator = ServantAggregator::new(&normalizer, &formatter, &settings, today);
///
/// let servant = RawServant::new(
///     RawRecord::new().with("MATRICULA", "1001").with("NOME", "Ana Souza"),
///     vec![RawRecord::new().with("INICIO", "11/06/2025").with("DIAS", 30)],
/// );
/// let aggregate = aggregator.aggregate(&servant);
///
/// assert_eq!(aggregate.id.as_deref(), Some("1001"));
/// assert_eq!(aggregate.worst_urgency, UrgencyTier::Critical);
/// assert_eq!(aggregate.next_event_display, "11/06/2025");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ServantAggregator<'a> {
    normalizer: &'a DateNormalizer,
    formatter: &'a DateFormatter,
    settings: &'a EngineSettings,
    today: NaiveDate,
}

impl<'a> ServantAggregator<'a> {
    /// Creates an aggregator for one batch pass.
    pub fn new(
        normalizer: &'a DateNormalizer,
        formatter: &'a DateFormatter,
        settings: &'a EngineSettings,
        today: NaiveDate,
    ) -> Self {
        Self {
            normalizer,
            formatter,
            settings,
            today,
        }
    }

    /// Aggregates one servant. Never fails.
    pub fn aggregate(&self, raw: &RawServant) -> ServantAggregate {
        let fields = &self.settings.fields;
        let enricher = LeaveEventEnricher::new(self.normalizer, self.settings, self.today);

        let mut warnings = Vec::new();
        let mut events = Vec::with_capacity(raw.events.len());
        for raw_event in &raw.events {
            let result = enricher.enrich(raw_event);
            warnings.extend(result.warnings);
            events.extend(result.event);
        }
        events.sort_by_key(|event| event.start);

        let windows = calculate_windows(&events, &self.settings.entitlement, self.today);
        warnings.extend(windows.warnings);
        let windows = windows.windows;

        let total_days_consumed = events
            .iter()
            .fold(0u32, |total, event| total.saturating_add(event.days_consumed));
        let total_quota = windows
            .iter()
            .fold(0u32, |total, window| total.saturating_add(window.quota_generated));

        let worst_urgency = events
            .iter()
            .map(|event| event.urgency)
            .max()
            .unwrap_or(UrgencyTier::Undefined);
        let next_event_start = events.first().map(|event| event.start);
        let upcoming_event_start = events
            .iter()
            .map(|event| event.start)
            .find(|start| *start >= self.today);

        let aggregate = ServantAggregate {
            id: raw.record.text(&fields.servant_id),
            name: raw.record.text(&fields.servant_name).unwrap_or_default(),
            assignment: resolve_assignment(&raw.record, fields, &self.settings.assignment),
            total_events: events.len(),
            total_days_consumed,
            total_quota,
            total_days_available: total_quota.saturating_sub(total_days_consumed),
            worst_urgency,
            next_event_start,
            next_event_display: self.formatter.format_optional(next_event_start),
            upcoming_event_start,
            consumption_mismatches: events
                .iter()
                .filter(|event| event.has_consumption_mismatch())
                .count(),
            events,
            windows,
            warnings,
        };

        debug!(
            servant_id = aggregate.id.as_deref().unwrap_or("-"),
            events = aggregate.total_events,
            windows = aggregate.windows.len(),
            warnings = aggregate.warnings.len(),
            "Aggregated servant"
        );

        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawRecord, WarningCode, WindowKind};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn aggregate_on(servant: &RawServant, today: &str) -> ServantAggregate {
        let settings = EngineSettings::default();
        let normalizer = DateNormalizer::new();
        let formatter = DateFormatter::default();
        ServantAggregator::new(&normalizer, &formatter, &settings, make_date(today))
            .aggregate(servant)
    }

    fn identity() -> RawRecord {
        RawRecord::new()
            .with("MATRICULA", "2002")
            .with("NOME", "Carlos Lima")
            .with("LOTACAO", "Escola Estadual Central")
    }

    /// SA-001: servant with no events
    #[test]
    fn test_sa_001_servant_without_events() {
        let aggregate = aggregate_on(&RawServant::new(identity(), vec![]), "2025-06-01");

        assert_eq!(aggregate.total_events, 0);
        assert_eq!(aggregate.total_days_consumed, 0);
        assert_eq!(aggregate.worst_urgency, UrgencyTier::Undefined);
        assert_eq!(aggregate.next_event_start, None);
        assert_eq!(aggregate.next_event_display, "-");
        assert_eq!(aggregate.total_quota, 450);
        assert!(aggregate.uses_synthetic_windows());
    }

    /// SA-002: events ordered by start regardless of input order
    #[test]
    fn test_sa_002_events_sorted_by_start() {
        let servant = RawServant::new(
            identity(),
            vec![
                RawRecord::new().with("INICIO", "01/09/2025").with("DIAS", 30),
                RawRecord::new().with("INICIO", "01/02/2025").with("DIAS", 30),
                RawRecord::new().with("INICIO", "05/07/2025").with("DIAS", 15),
            ],
        );
        let aggregate = aggregate_on(&servant, "2025-06-01");

        let starts: Vec<_> = aggregate.events.iter().map(|e| e.start).collect();
        assert_eq!(
            starts,
            vec![
                make_date("2025-02-01"),
                make_date("2025-07-05"),
                make_date("2025-09-01")
            ]
        );
        assert_eq!(aggregate.next_event_start, Some(make_date("2025-02-01")));
        assert_eq!(aggregate.upcoming_event_start, Some(make_date("2025-07-05")));
        assert_eq!(aggregate.worst_urgency, UrgencyTier::High);
        assert_eq!(aggregate.total_days_consumed, 75);
    }

    /// SA-003: totals with recorded windows
    #[test]
    fn test_sa_003_recorded_totals() {
        let event = |start: &str, days: u32| {
            RawRecord::new()
                .with("INICIO", start)
                .with("DIAS", days)
                .with("AQUISITIVO INICIO", "01/01/2020")
                .with("AQUISITIVO FIM", "31/12/2024")
        };
        let servant = RawServant::new(
            identity(),
            vec![event("01/03/2022", 40), event("01/05/2023", 20)],
        );
        let aggregate = aggregate_on(&servant, "2025-06-01");

        assert_eq!(aggregate.windows.len(), 2);
        assert_eq!(aggregate.windows[0].days_consumed, 60);
        assert_eq!(aggregate.windows[0].days_available, 30);
        assert_eq!(aggregate.windows[1].kind, WindowKind::Projected);
        assert_eq!(aggregate.total_quota, 180);
        assert_eq!(aggregate.total_days_available, 120);
        assert!(!aggregate.uses_synthetic_windows());
    }

    /// SA-004: dropped events leave no trace in the rollups
    #[test]
    fn test_sa_004_dropped_event_ignored() {
        let servant = RawServant::new(
            identity(),
            vec![
                RawRecord::new().with("INICIO", "01/02/2025").with("DIAS", 30),
                RawRecord::new().with("DIAS", 90),
            ],
        );
        let aggregate = aggregate_on(&servant, "2025-06-01");

        assert_eq!(aggregate.total_events, 1);
        assert_eq!(aggregate.total_days_consumed, 30);
        assert!(!aggregate.has_warnings());
    }

    #[test]
    fn test_warnings_collected_from_events_and_windows() {
        let servant = RawServant::new(
            identity(),
            vec![
                RawRecord::new()
                    .with("INICIO", "01/03/2022")
                    .with("DIAS", 30)
                    .with("DIAS GOZADOS", 10)
                    .with("AQUISITIVO INICIO", "01/01/2020"),
                RawRecord::new().with("INICIO", "01/03/2012").with("DIAS", 30),
            ],
        );
        let aggregate = aggregate_on(&servant, "2025-06-01");
        let codes: Vec<_> = aggregate.warnings.iter().map(|w| w.code).collect();

        assert!(codes.contains(&WarningCode::ConsumptionMismatch));
        assert!(codes.contains(&WarningCode::UnattributedEvent));
        assert_eq!(aggregate.consumption_mismatches, 1);
        assert_eq!(aggregate.total_days_consumed, 60);
    }

    #[test]
    fn test_identity_defaults() {
        let aggregate = aggregate_on(&RawServant::default(), "2025-06-01");
        assert_eq!(aggregate.id, None);
        assert_eq!(aggregate.name, "");
        assert_eq!(aggregate.assignment, "No assignment");
    }

    #[test]
    fn test_numeric_id_rendered_as_text() {
        let record = RawRecord::new().with("MATRICULA", 123456);
        let aggregate = aggregate_on(&RawServant::new(record, vec![]), "2025-06-01");
        assert_eq!(aggregate.id.as_deref(), Some("123456"));
    }
}
