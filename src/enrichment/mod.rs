//! Enrichment pipeline for premium leave records.
//!
//! This module contains the pure transforms that turn raw records into the
//! canonical model: date normalization and formatting, lenient numeric
//! parsing, per-event enrichment with status and urgency classification,
//! acquisitive window reconstruction, assignment resolution and the
//! per-servant aggregation that composes them.

mod assignment;
mod date_format;
mod date_normalizer;
mod event_enricher;
mod event_status;
mod numeric;
mod servant_aggregator;
mod urgency;
mod window_calculator;

pub use assignment::resolve_assignment;
pub use date_format::DateFormatter;
pub use date_normalizer::{DateNormalizer, DateStrategy};
pub use event_enricher::{EventEnrichmentResult, LeaveEventEnricher};
pub use event_status::classify_status;
pub use numeric::{BalanceParseResult, NumericField, first_integer_token, parse_balance, read_integer};
pub use servant_aggregator::ServantAggregator;
pub use urgency::{classify_urgency, days_until};
pub use window_calculator::{WindowCalculationResult, calculate_windows};
