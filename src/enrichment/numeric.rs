//! Lenient numeric field parsing.
//!
//! Day counts and balances arrive as numbers, as bare digits, or as text
//! with unit annotations (`"15 (DIAS)"`, `"90 dias"`). The first integer
//! token wins.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::RawValue;

/// Outcome of reading an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    /// The field was missing or blank.
    Absent,
    /// An integer was found.
    Value(i64),
    /// The field held something, but no integer could be read from it.
    Malformed,
}

impl NumericField {
    /// Returns the value if it is strictly positive.
    pub fn positive(self) -> Option<u32> {
        match self {
            NumericField::Value(n) if n > 0 => u32::try_from(n).ok(),
            _ => None,
        }
    }
}

fn integer_token() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"-?\d+").expect("valid integer token pattern"))
}

/// Extracts the first integer token from free text.
///
/// # Example
///
/// ```
/// use premium_leave_engine::enrichment::first_integer_token;
///
/// assert_eq!(first_integer_token("15 (DIAS)"), Some(15));
/// assert_eq!(first_integer_token("saldo: 12,5"), Some(12));
/// assert_eq!(first_integer_token("sem saldo"), None);
/// ```
pub fn first_integer_token(text: &str) -> Option<i64> {
    integer_token().find(text)?.as_str().parse().ok()
}

/// Reads an integer from an optional raw value.
///
/// Numbers are truncated toward zero; text yields its first integer token.
pub fn read_integer(value: Option<&RawValue>) -> NumericField {
    match value {
        None | Some(RawValue::Empty) => NumericField::Absent,
        Some(RawValue::Number(n)) if n.is_finite() => {
            let truncated = n.trunc();
            if truncated.abs() <= i64::MAX as f64 {
                NumericField::Value(truncated as i64)
            } else {
                NumericField::Malformed
            }
        }
        Some(RawValue::Number(_)) => NumericField::Absent,
        Some(RawValue::Text(text)) if text.trim().is_empty() => NumericField::Absent,
        Some(RawValue::Text(text)) => first_integer_token(text)
            .map(NumericField::Value)
            .unwrap_or(NumericField::Malformed),
        Some(RawValue::Date(_)) | Some(RawValue::DateTime(_)) => NumericField::Malformed,
    }
}

/// A parsed balance field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceParseResult {
    /// The source text, empty when absent.
    pub raw: String,
    /// Days parsed from `raw`; 0 when absent, malformed or negative.
    pub days: u32,
    /// True when a value was present but held no number.
    pub malformed: bool,
}

/// Parses a remaining-balance field such as `"15 (DIAS)"`.
pub fn parse_balance(value: Option<&RawValue>) -> BalanceParseResult {
    let raw = value.and_then(RawValue::as_text).unwrap_or_default();
    match read_integer(value) {
        NumericField::Value(n) => BalanceParseResult {
            raw,
            days: u32::try_from(n.max(0)).unwrap_or(u32::MAX),
            malformed: false,
        },
        NumericField::Malformed => BalanceParseResult {
            raw,
            days: 0,
            malformed: true,
        },
        NumericField::Absent => BalanceParseResult {
            raw,
            days: 0,
            malformed: false,
        },
    }
}
