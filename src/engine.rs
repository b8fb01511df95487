//! Batch enrichment engine.
//!
//! [`PremiumLeaveEngine`] owns validated settings and the injected date
//! services, captures the reference date once per batch and fans the
//! per-servant work out across worker threads. Results come back in input
//! order.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::config::{ConfigLoader, EngineSettings, FieldAliases};
use crate::enrichment::{DateFormatter, DateNormalizer, ServantAggregator};
use crate::error::{EngineError, EngineResult};
use crate::models::{RawRecord, RawServant, ServantAggregate};

/// The premium leave enrichment engine.
///
/// # Example
///
/// ```
/// use premium_leave_engine::PremiumLeaveEngine;
/// use premium_leave_engine::config::EngineSettings;
/// use premium_leave_engine::models::{RawRecord, RawServant};
/// use chrono::NaiveDate;
///
/// let engine = PremiumLeaveEngine::new(EngineSettings::default())?;
/// let servants = vec![RawServant::new(
///     RawRecord::new().with("MATRICULA", "1001"),
///     vec![RawRecord::new().with("INICIO", "01/06/2025").with("DIAS", 90)],
/// )];
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let aggregates = engine.enrich(&servants, today);
/// assert_eq!(aggregates[0].total_days_consumed, 90);
/// # Ok::<(), premium_leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PremiumLeaveEngine {
    settings: EngineSettings,
    normalizer: DateNormalizer,
    formatter: DateFormatter,
}

impl PremiumLeaveEngine {
    /// Creates an engine with the standard date services.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the settings fail validation.
    pub fn new(settings: EngineSettings) -> EngineResult<Self> {
        let formatter = DateFormatter::from_settings(&settings.display);
        Self::with_date_services(settings, DateNormalizer::new(), formatter)
    }

    /// Creates an engine from a YAML settings file.
    ///
    /// # Errors
    ///
    /// Any error from [`ConfigLoader::load`].
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        Self::new(ConfigLoader::load(path)?.into_settings())
    }

    /// Creates an engine with caller-supplied date services.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the settings fail validation.
    pub fn with_date_services(
        settings: EngineSettings,
        normalizer: DateNormalizer,
        formatter: DateFormatter,
    ) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            normalizer,
            formatter,
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Enriches a batch of servants against `today`.
    ///
    /// Servants are processed in parallel; the output has one aggregate per
    /// input servant, in input order.
    pub fn enrich(&self, servants: &[RawServant], today: NaiveDate) -> Vec<ServantAggregate> {
        let batch_id = Uuid::new_v4();
        let span = info_span!("enrich_batch", batch_id = %batch_id, reference_date = %today);
        let _guard = span.enter();

        let start_time = Instant::now();
        let aggregator =
            ServantAggregator::new(&self.normalizer, &self.formatter, &self.settings, today);

        let aggregates: Vec<ServantAggregate> = servants
            .par_iter()
            .map(|servant| aggregator.aggregate(servant))
            .collect();

        info!(
            batch_id = %batch_id,
            servants = aggregates.len(),
            events = aggregates.iter().map(|a| a.total_events).sum::<usize>(),
            warnings = aggregates.iter().map(|a| a.warnings.len()).sum::<usize>(),
            duration_us = start_time.elapsed().as_micros(),
            "Premium leave batch enriched"
        );

        aggregates
    }

    /// Enriches a batch against the local calendar date, read once.
    pub fn enrich_as_of_now(&self, servants: &[RawServant]) -> Vec<ServantAggregate> {
        self.enrich(servants, Local::now().date_naive())
    }

    /// Enriches flat rows, one per leave event, each carrying the servant's
    /// identity columns.
    ///
    /// Rows are grouped by servant id, falling back to name, in first-seen
    /// order. Rows with neither stand alone.
    pub fn enrich_rows(&self, rows: Vec<RawRecord>, today: NaiveDate) -> Vec<ServantAggregate> {
        let servants = group_rows(rows, &self.settings.fields);
        self.enrich(&servants, today)
    }

    /// Reads a JSON batch: an array of servant objects with their events
    /// nested under one of the configured event keys.
    ///
    /// Non-object elements are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBatchShape`] if `value` is not an array.
    pub fn parse_json_batch(&self, value: &Value) -> EngineResult<Vec<RawServant>> {
        let items = value.as_array().ok_or_else(|| EngineError::InvalidBatchShape {
            expected: "an array of servant records".to_string(),
            found: json_kind(value).to_string(),
        })?;

        let event_keys = &self.settings.fields.events;
        Ok(items
            .iter()
            .filter_map(|item| RawServant::from_json(item, event_keys))
            .collect())
    }

    /// Enriches a JSON batch against `today`.
    ///
    /// A batch that is not an array yields an empty result.
    pub fn enrich_json(&self, value: &Value, today: NaiveDate) -> Vec<ServantAggregate> {
        match self.parse_json_batch(value) {
            Ok(servants) => self.enrich(&servants, today),
            Err(err) => {
                warn!(error = %err, "Rejected premium leave batch");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum RowKey {
    Id(String),
    Name(String),
}

fn group_rows(rows: Vec<RawRecord>, fields: &FieldAliases) -> Vec<RawServant> {
    let mut index: HashMap<RowKey, usize> = HashMap::new();
    let mut servants: Vec<RawServant> = Vec::new();

    for row in rows {
        let key = row
            .text(&fields.servant_id)
            .map(RowKey::Id)
            .or_else(|| row.text(&fields.servant_name).map(RowKey::Name));

        let position = key.as_ref().and_then(|key| index.get(key).copied());
        match position {
            Some(position) => servants[position].events.push(row),
            None => {
                if let Some(key) = key {
                    index.insert(key, servants.len());
                }
                servants.push(RawServant::new(row.clone(), vec![row]));
            }
        }
    }

    servants
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn engine() -> PremiumLeaveEngine {
        PremiumLeaveEngine::new(EngineSettings::default()).unwrap()
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = EngineSettings::default();
        settings.entitlement.quota_days = 0;
        assert!(matches!(
            PremiumLeaveEngine::new(settings),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_from_config_file() {
        let engine = PremiumLeaveEngine::from_config_file("./config/premium_leave.yaml").unwrap();
        assert_eq!(engine.settings(), &EngineSettings::default());
    }

    #[test]
    fn test_output_order_matches_input() {
        let servants: Vec<RawServant> = (0..50i32)
            .map(|i| RawServant::new(RawRecord::new().with("MATRICULA", i), vec![]))
            .collect();
        let aggregates = engine().enrich(&servants, make_date("2025-06-01"));

        let ids: Vec<String> = aggregates.into_iter().filter_map(|a| a.id).collect();
        let expected: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_group_rows_by_id_then_name() {
        let fields = FieldAliases::default();
        let rows = vec![
            RawRecord::new().with("MATRICULA", "1").with("INICIO", "01/01/2025"),
            RawRecord::new().with("NOME", "Bia").with("INICIO", "01/02/2025"),
            RawRecord::new().with("MATRICULA", "1").with("INICIO", "01/03/2025"),
            RawRecord::new().with("NOME", "Bia").with("INICIO", "01/04/2025"),
            RawRecord::new().with("INICIO", "01/05/2025"),
            RawRecord::new().with("INICIO", "01/06/2025"),
        ];
        let servants = group_rows(rows, &fields);

        let sizes: Vec<usize> = servants.iter().map(|s| s.events.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1, 1]);
    }

    #[test]
    fn test_parse_json_batch_rejects_non_array() {
        let result = engine().parse_json_batch(&json!({ "servants": [] }));
        match result {
            Err(EngineError::InvalidBatchShape { found, .. }) => assert_eq!(found, "an object"),
            other => panic!("Expected InvalidBatchShape, got {:?}", other),
        }
    }

    #[test]
    fn test_enrich_json_non_array_is_empty() {
        assert!(engine().enrich_json(&json!("oops"), make_date("2025-06-01")).is_empty());
    }

    #[test]
    fn test_enrich_json_skips_non_objects() {
        let batch = json!([
            { "MATRICULA": "1", "events": [{ "INICIO": "01/06/2025", "DIAS": 30 }] },
            42,
            { "MATRICULA": "2" }
        ]);
        let aggregates = engine().enrich_json(&batch, make_date("2025-01-15"));

        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].total_events, 1);
        assert_eq!(aggregates[1].total_events, 0);
    }
}
