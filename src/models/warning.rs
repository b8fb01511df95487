//! Recovered data-quality warnings.

use serde::{Deserialize, Serialize};

/// The kind of issue that was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// A date field was present but matched no known format.
    UnparseableDate,
    /// A numeric field held no usable number.
    MalformedNumericField,
    /// An event's end date preceded its start date and was discarded.
    InvertedDateRange,
    /// The source consumption figure disagrees with the event's own span.
    ConsumptionMismatch,
    /// A recorded window overlapped an earlier one and was folded into it.
    OverlappingWindow,
    /// An event could not be placed in any recorded window.
    UnattributedEvent,
}

/// A warning raised while enriching a servant's records.
///
/// Warnings never stop the pipeline; they record what was recovered and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentWarning {
    /// What kind of issue was recovered.
    pub code: WarningCode,
    /// The canonical field involved, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl EnrichmentWarning {
    /// Creates a warning tied to a field.
    pub fn for_field(code: WarningCode, field: &str, message: impl Into<String>) -> Self {
        Self {
            code,
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    /// Creates a warning not tied to a single field.
    pub fn general(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            field: None,
            message: message.into(),
        }
    }
}
