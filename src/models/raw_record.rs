//! Raw, loosely-structured input records.
//!
//! Upstream parsers hand over field-keyed records whose column names and
//! value shapes vary from source to source. [`RawRecord`] keeps every field
//! it is given and answers lookups through alias lists, so unknown columns
//! are carried along harmlessly and missing ones simply read as absent.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

/// A single raw cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Free text, as read from the source.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// A calendar date already typed by the upstream parser.
    Date(NaiveDate),
    /// A date-time already typed by the upstream parser.
    DateTime(NaiveDateTime),
    /// An empty cell.
    Empty,
}

impl RawValue {
    /// Converts a JSON scalar into a raw value.
    ///
    /// Arrays and objects have no scalar meaning and become [`RawValue::Empty`].
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => RawValue::Text(s.clone()),
            Value::Number(n) => n.as_f64().map_or(RawValue::Empty, RawValue::Number),
            Value::Bool(b) => RawValue::Text(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => RawValue::Empty,
        }
    }

    /// Returns true if the value carries no usable content.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::Number(n) => !n.is_finite(),
            RawValue::Date(_) | RawValue::DateTime(_) => false,
            RawValue::Empty => true,
        }
    }

    /// Renders the value as trimmed text, or `None` when blank.
    ///
    /// Whole numbers render without a fractional part (`90.0` → `"90"`).
    pub fn as_text(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        Some(match self {
            RawValue::Text(s) => s.trim().to_string(),
            RawValue::Number(n) if n.fract() == 0.0 => format!("{:.0}", n),
            RawValue::Number(n) => n.to_string(),
            RawValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            RawValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            RawValue::Empty => return None,
        })
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<NaiveDate> for RawValue {
    fn from(value: NaiveDate) -> Self {
        RawValue::Date(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        RawValue::DateTime(value)
    }
}

/// Canonicalises a field name or label for comparison.
///
/// Upper-cases, folds Portuguese accents, treats `_`, `-` and `.` as spaces
/// and collapses runs of whitespace.
///
/// # Example
///
/// ```
/// use premium_leave_engine::models::canonical_key;
///
/// assert_eq!(canonical_key("  Data_Início "), "DATA INICIO");
/// assert_eq!(canonical_key("LOTAÇÃO"), "LOTACAO");
/// ```
pub fn canonical_key(name: &str) -> String {
    let folded: String = name
        .chars()
        .flat_map(char::to_uppercase)
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            '_' | '-' | '.' => ' ',
            other => other,
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A field-keyed raw record (one servant row or one leave event).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// # Example
    ///
    /// ```
    /// use premium_leave_engine::models::RawRecord;
    ///
    /// let record = RawRecord::new()
    ///     .with("Início", "01/06/2025")
    ///     .with("GOZO", 90);
    /// assert_eq!(record.len(), 2);
    /// ```
    pub fn with(mut self, name: &str, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a field, replacing any field with the same canonical name.
    pub fn insert(&mut self, name: &str, value: impl Into<RawValue>) {
        self.fields.insert(canonical_key(name), value.into());
    }

    /// Returns the first non-blank value among `aliases`, in alias order.
    pub fn get(&self, aliases: &[String]) -> Option<&RawValue> {
        aliases
            .iter()
            .filter_map(|alias| self.fields.get(&canonical_key(alias)))
            .find(|value| !value.is_blank())
    }

    /// Returns every non-blank value among `aliases`, in alias order.
    ///
    /// Callers that validate values use this to fall through to a later
    /// alias when an earlier one holds junk.
    pub fn values<'r>(
        &'r self,
        aliases: &'r [String],
    ) -> impl Iterator<Item = &'r RawValue> + 'r {
        aliases
            .iter()
            .filter_map(|alias| self.fields.get(&canonical_key(alias)))
            .filter(|value| !value.is_blank())
    }

    /// Returns the first non-blank value among `aliases` rendered as text.
    pub fn text(&self, aliases: &[String]) -> Option<String> {
        self.get(aliases).and_then(RawValue::as_text)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a record from a JSON object, skipping the keys in `exclude`.
    ///
    /// Returns `None` if `value` is not an object.
    pub fn from_json(value: &Value, exclude: &[String]) -> Option<Self> {
        let object = value.as_object()?;
        let excluded: Vec<String> = exclude.iter().map(|k| canonical_key(k)).collect();

        let fields = object
            .iter()
            .map(|(key, value)| (canonical_key(key), value))
            .filter(|(key, _)| !excluded.contains(key))
            .map(|(key, value)| (key, RawValue::from_json(value)))
            .collect();

        Some(Self { fields })
    }
}

/// One servant's raw identity record plus its raw leave events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawServant {
    /// Identity and assignment fields.
    pub record: RawRecord,
    /// Raw leave events, in source order.
    pub events: Vec<RawRecord>,
}

impl RawServant {
    /// Creates a raw servant from its record and events.
    pub fn new(record: RawRecord, events: Vec<RawRecord>) -> Self {
        Self { record, events }
    }

    /// Builds a raw servant from a JSON object whose nested events live
    /// under one of `event_keys`.
    ///
    /// Returns `None` if `value` is not an object. Non-object entries in the
    /// events array are skipped.
    pub fn from_json(value: &Value, event_keys: &[String]) -> Option<Self> {
        let record = RawRecord::from_json(value, event_keys)?;
        let object = value.as_object()?;
        let wanted: Vec<String> = event_keys.iter().map(|k| canonical_key(k)).collect();

        let events = object
            .iter()
            .filter(|(key, _)| wanted.contains(&canonical_key(key)))
            .find_map(|(_, value)| value.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| RawRecord::from_json(item, &[]))
                    .collect()
            })
            .unwrap_or_default();

        Some(Self { record, events })
    }
}
