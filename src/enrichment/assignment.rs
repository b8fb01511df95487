//! Assignment (lotação) resolution.

use crate::config::{AssignmentSettings, FieldAliases};
use crate::models::{RawRecord, canonical_key};

/// Resolves the display assignment for a servant record.
///
/// Prefers the explicit assignment field, then the unit field unless it
/// names a generic organisation, then the configured fallback label. The
/// result is whitespace-collapsed and never empty.
///
/// # Example
///
/// ```
/// use premium_leave_engine::config::{AssignmentSettings, FieldAliases};
/// use premium_leave_engine::enrichment::resolve_assignment;
/// use premium_leave_engine::models::RawRecord;
///
/// let fields = FieldAliases::default();
/// let settings = AssignmentSettings::default();
///
/// let record = RawRecord::new().with("UNIDADE", "Secretaria");
/// assert_eq!(resolve_assignment(&record, &fields, &settings), "No assignment");
///
/// let record = RawRecord::new().with("LOTACAO", "  Escola   Estadual X ");
/// assert_eq!(resolve_assignment(&record, &fields, &settings), "Escola Estadual X");
/// ```
pub fn resolve_assignment(
    record: &RawRecord,
    fields: &FieldAliases,
    settings: &AssignmentSettings,
) -> String {
    if let Some(assignment) = record.text(&fields.assignment).and_then(|v| collapse(&v)) {
        return assignment;
    }

    let unit = record
        .text(&fields.unit)
        .and_then(|v| collapse(&v))
        .filter(|unit| !is_generic_unit(unit, settings));
    if let Some(unit) = unit {
        return unit;
    }

    collapse(&settings.fallback_label).unwrap_or_else(|| "No assignment".to_string())
}

fn collapse(value: &str) -> Option<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

fn is_generic_unit(unit: &str, settings: &AssignmentSettings) -> bool {
    let key = canonical_key(unit);
    settings
        .generic_units
        .iter()
        .any(|generic| canonical_key(generic) == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(record: &RawRecord) -> String {
        resolve_assignment(record, &FieldAliases::default(), &AssignmentSettings::default())
    }

    #[test]
    fn test_explicit_assignment_wins() {
        let record = RawRecord::new()
            .with("LOTACAO", "Hospital Regional")
            .with("UNIDADE", "Diretoria de Saúde");
        assert_eq!(resolve(&record), "Hospital Regional");
    }

    #[test]
    fn test_unit_used_when_specific() {
        let record = RawRecord::new().with("UNIDADE", "Diretoria de Saúde");
        assert_eq!(resolve(&record), "Diretoria de Saúde");
    }

    #[test]
    fn test_generic_unit_rejected_case_and_accent_insensitive() {
        for unit in ["secretaria", "Governo do Estado", "ÓRGÃO CENTRAL", "n/a"] {
            let record = RawRecord::new().with("ORGAO", unit);
            assert_eq!(resolve(&record), "No assignment", "unit {unit}");
        }
    }

    #[test]
    fn test_blank_assignment_falls_through() {
        let record = RawRecord::new()
            .with("LOTACAO", "   ")
            .with("SETOR", "Almoxarifado");
        assert_eq!(resolve(&record), "Almoxarifado");
    }

    #[test]
    fn test_empty_record_uses_fallback() {
        assert_eq!(resolve(&RawRecord::new()), "No assignment");
    }

    #[test]
    fn test_custom_fallback_label() {
        let settings = AssignmentSettings {
            fallback_label: "Sem lotação".to_string(),
            ..AssignmentSettings::default()
        };
        let record = RawRecord::new();
        assert_eq!(
            resolve_assignment(&record, &FieldAliases::default(), &settings),
            "Sem lotação"
        );
    }
}
