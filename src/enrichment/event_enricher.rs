//! Leave event enrichment.
//!
//! Turns one raw, loosely-keyed leave record into a canonical
//! [`LeaveEvent`], deriving whichever of end date and duration the source
//! left out and classifying the result against the batch reference date.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::config::EngineSettings;
use crate::models::{EnrichmentWarning, LeaveEvent, RawRecord, WarningCode};

use super::date_normalizer::DateNormalizer;
use super::event_status::classify_status;
use super::numeric::{NumericField, parse_balance, read_integer};
use super::urgency::{classify_urgency, days_until};

/// The result of enriching one raw leave record.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnrichmentResult {
    /// The enriched event, or `None` when the record has no usable start.
    pub event: Option<LeaveEvent>,
    /// Data issues recovered while enriching the record.
    pub warnings: Vec<EnrichmentWarning>,
}

/// Enriches raw leave records against a fixed reference date.
///
/// # Example
///
/// ```
/// use premium_leave_engine::config::EngineSettings;
/// use premium_leave_engine::enrichment::{DateNormalizer, LeaveEventEnricher};
/// use premium_leave_engine::models::RawRecord;
/// use chrono::NaiveDate;
///
/// let settings = EngineSettings::default();
/// let normalizer = DateNormalizer::new();
/// let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let enricher = LeaveEventEnricher::new(&normalizer, &settings, today);
///
/// let raw = RawRecord::new().with("INICIO", "01/06/2025").with("GOZO", 90);
/// let event = enricher.enrich(&raw).event.unwrap();
/// assert_eq!(event.end, NaiveDate::from_ymd_opt(2025, 8, 29).unwrap());
/// assert_eq!(event.months, 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LeaveEventEnricher<'a> {
    normalizer: &'a DateNormalizer,
    settings: &'a EngineSettings,
    today: NaiveDate,
}

impl<'a> LeaveEventEnricher<'a> {
    /// Creates an enricher for one batch pass.
    pub fn new(normalizer: &'a DateNormalizer, settings: &'a EngineSettings, today: NaiveDate) -> Self {
        Self {
            normalizer,
            settings,
            today,
        }
    }

    /// Enriches one raw leave record.
    ///
    /// Never fails: unusable fields are treated as absent and reported in
    /// the returned warnings. Records without a usable start date yield no
    /// event.
    pub fn enrich(&self, raw: &RawRecord) -> EventEnrichmentResult {
        let fields = &self.settings.fields;
        let mut warnings = Vec::new();

        let start = self.read_date(raw, &fields.start, "start", &mut warnings);
        let end = self.read_date(raw, &fields.end, "end", &mut warnings);
        let days = read_days(raw, &fields.days, &mut warnings);

        let Some(start) = start else {
            debug!(
                field_count = raw.len(),
                "Dropping leave event without a usable start date"
            );
            return EventEnrichmentResult {
                event: None,
                warnings,
            };
        };

        let end = match end {
            Some(end) if end < start => {
                warnings.push(EnrichmentWarning::for_field(
                    WarningCode::InvertedDateRange,
                    "end",
                    format!("end {} precedes start {}; end re-derived", end, start),
                ));
                None
            }
            other => other,
        };

        let (end, days) = match (end, days) {
            (Some(end), Some(days)) => (end, days),
            (None, Some(days)) => (end_from_days(start, days), days),
            (Some(end), None) => (end, span_days(start, end)),
            (None, None) => {
                let fallback = self.settings.entitlement.fallback_event_days;
                (end_from_days(start, fallback), fallback)
            }
        };

        let recorded_consumed = read_recorded_consumed(raw, &fields.consumed, &mut warnings);
        if let Some(recorded) = recorded_consumed.filter(|recorded| *recorded != days) {
            warnings.push(EnrichmentWarning::for_field(
                WarningCode::ConsumptionMismatch,
                "consumed",
                format!(
                    "source reports {} days consumed for an event of {} days",
                    recorded, days
                ),
            ));
        }

        let balance = parse_balance(raw.get(&fields.balance));
        if balance.malformed {
            warnings.push(EnrichmentWarning::for_field(
                WarningCode::MalformedNumericField,
                "balance",
                format!("no number in balance '{}'", balance.raw),
            ));
        }

        let months = match read_integer(raw.get(&fields.months)) {
            NumericField::Value(n) if n >= 0 => u32::try_from(n).unwrap_or(u32::MAX),
            NumericField::Malformed => {
                warnings.push(EnrichmentWarning::for_field(
                    WarningCode::MalformedNumericField,
                    "months",
                    "no number in months; derived from days",
                ));
                months_from_days(days)
            }
            _ => months_from_days(days),
        };

        let window_start = self.read_date(raw, &fields.window_start, "window_start", &mut warnings);
        let window_end = self.read_date(raw, &fields.window_end, "window_end", &mut warnings);

        let status = classify_status(start, end, balance.days, self.today);
        let urgency = classify_urgency(Some(start), status, self.today, &self.settings.urgency);

        let event = LeaveEvent {
            start,
            end,
            kind: raw
                .text(&fields.kind)
                .unwrap_or_else(|| self.settings.display.default_kind.clone()),
            description: raw.text(&fields.description).unwrap_or_default(),
            days,
            days_consumed: days,
            recorded_consumed,
            months,
            balance_raw: balance.raw,
            balance_days: balance.days,
            window_start,
            window_end,
            status,
            urgency,
            days_until_start: days_until(start, self.today),
        };

        EventEnrichmentResult {
            event: Some(event),
            warnings,
        }
    }

    /// Reads the first alias whose value normalises to a date. Warns only
    /// when values are present and none of them is a date.
    fn read_date(
        &self,
        raw: &RawRecord,
        aliases: &[String],
        field: &str,
        warnings: &mut Vec<EnrichmentWarning>,
    ) -> Option<NaiveDate> {
        let mut values = raw.values(aliases).peekable();
        let first = values.peek().copied()?;
        let date = values.find_map(|value| self.normalizer.normalize(value));
        if date.is_none() {
            warnings.push(EnrichmentWarning::for_field(
                WarningCode::UnparseableDate,
                field,
                format!(
                    "unrecognised date '{}'",
                    first.as_text().unwrap_or_default()
                ),
            ));
        }
        date
    }
}

/// Reads the first alias holding a number, so a junk primary column does not
/// hide a usable secondary one.
fn read_days(
    raw: &RawRecord,
    aliases: &[String],
    warnings: &mut Vec<EnrichmentWarning>,
) -> Option<u32> {
    let mut field = NumericField::Absent;
    for value in raw.values(aliases) {
        match read_integer(Some(value)) {
            parsed @ NumericField::Value(_) => {
                field = parsed;
                break;
            }
            NumericField::Malformed => field = NumericField::Malformed,
            NumericField::Absent => {}
        }
    }

    if field == NumericField::Malformed {
        warnings.push(EnrichmentWarning::for_field(
            WarningCode::MalformedNumericField,
            "days",
            "no number in duration; treated as absent",
        ));
    }
    field.positive()
}

fn read_recorded_consumed(
    raw: &RawRecord,
    aliases: &[String],
    warnings: &mut Vec<EnrichmentWarning>,
) -> Option<u32> {
    match read_integer(raw.get(aliases)) {
        NumericField::Value(n) => Some(u32::try_from(n.max(0)).unwrap_or(u32::MAX)),
        NumericField::Malformed => {
            warnings.push(EnrichmentWarning::for_field(
                WarningCode::MalformedNumericField,
                "consumed",
                "no number in consumed days; ignored",
            ));
            None
        }
        NumericField::Absent => None,
    }
}

/// `start + days - 1`, saturating at the calendar's upper bound.
fn end_from_days(start: NaiveDate, days: u32) -> NaiveDate {
    start
        .checked_add_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MAX)
}

/// Inclusive day count of `[start, end]`.
fn span_days(start: NaiveDate, end: NaiveDate) -> u32 {
    u32::try_from((end - start).num_days() + 1).unwrap_or(u32::MAX)
}

/// Rounds a day count to the nearest 30-day month.
fn months_from_days(days: u32) -> u32 {
    days.saturating_add(15) / 30
}
