//! Configuration types for premium leave enrichment.
//!
//! This module contains the strongly-typed settings that are deserialized
//! from YAML. Every section falls back to the statutory defaults, so a
//! partial file (or no file at all) is valid.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Upper bound for `entitlement.synthetic_window_count`.
pub const MAX_SYNTHETIC_WINDOWS: u32 = 100;

/// Entitlement accrual rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitlementSettings {
    /// Days of leave granted by one acquisitive window.
    pub quota_days: u32,
    /// Length of one acquisitive window in years.
    pub window_years: u32,
    /// Number of one-year placeholder windows generated when events carry
    /// no window metadata.
    pub synthetic_window_count: u32,
    /// Duration assumed for an event whose length cannot be derived.
    pub fallback_event_days: u32,
}

impl Default for EntitlementSettings {
    fn default() -> Self {
        Self {
            quota_days: 90,
            window_years: 5,
            synthetic_window_count: 5,
            fallback_event_days: 30,
        }
    }
}

/// Upper bounds (inclusive, in days until start) for each urgency tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyThresholds {
    /// Events starting within this many days are critical.
    pub critical_days: i64,
    /// Events starting within this many days are high priority.
    pub high_days: i64,
    /// Events starting within this many days are moderate priority.
    pub moderate_days: i64,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            critical_days: 30,
            high_days: 60,
            moderate_days: 90,
        }
    }
}

/// Rules for resolving a servant's assignment (lotação).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentSettings {
    /// Sentinel used when no assignment can be resolved.
    pub fallback_label: String,
    /// Organisation names too generic to serve as an assignment.
    pub generic_units: Vec<String>,
}

impl Default for AssignmentSettings {
    fn default() -> Self {
        Self {
            fallback_label: "No assignment".to_string(),
            generic_units: strings(&[
                "SECRETARIA",
                "SECRETARIA DE ESTADO",
                "GOVERNO DO ESTADO",
                "ESTADO",
                "PREFEITURA",
                "ORGAO CENTRAL",
                "N/A",
            ]),
        }
    }
}

/// Display conventions shared with downstream layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// chrono format pattern for rendering dates.
    pub date_pattern: String,
    /// Text rendered in place of an absent date.
    pub missing_date: String,
    /// Kind assigned to events whose source does not name one.
    pub default_kind: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            date_pattern: "%d/%m/%Y".to_string(),
            missing_date: "-".to_string(),
            default_kind: "Licença-prêmio".to_string(),
        }
    }
}

/// Accepted source names for each field, in lookup priority order.
///
/// Names are matched after canonicalisation (case, accents, `_`/`-` and
/// repeated whitespace are ignored), so `"Início"`, `"INICIO"` and
/// `"inicio"` all match the alias `"INICIO"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    /// Servant identifier (registration number).
    pub servant_id: Vec<String>,
    /// Servant display name.
    pub servant_name: Vec<String>,
    /// Explicit assignment (lotação).
    pub assignment: Vec<String>,
    /// Secondary organisational unit.
    pub unit: Vec<String>,
    /// Leave start date.
    pub start: Vec<String>,
    /// Leave end date.
    pub end: Vec<String>,
    /// Leave duration in days.
    pub days: Vec<String>,
    /// Days consumed as recorded by the source.
    pub consumed: Vec<String>,
    /// Remaining balance text.
    pub balance: Vec<String>,
    /// Duration in months.
    pub months: Vec<String>,
    /// Acquisitive window start.
    pub window_start: Vec<String>,
    /// Acquisitive window end.
    pub window_end: Vec<String>,
    /// Event kind.
    pub kind: Vec<String>,
    /// Free-text description.
    pub description: Vec<String>,
    /// Key holding a servant's nested events in JSON input.
    pub events: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            servant_id: strings(&["MATRICULA", "ID", "SERVANT ID", "CODIGO"]),
            servant_name: strings(&["NOME", "SERVIDOR", "NAME"]),
            assignment: strings(&["LOTACAO", "ASSIGNMENT", "SETOR"]),
            unit: strings(&["UNIDADE", "ORGAO", "UNIT"]),
            start: strings(&["INICIO", "DATA INICIO", "INICIO GOZO", "START"]),
            end: strings(&["FIM", "TERMINO", "DATA FIM", "FIM GOZO", "END"]),
            days: strings(&["DIAS", "GOZO", "QTD DIAS", "DURACAO", "DAYS"]),
            consumed: strings(&["DIAS GOZADOS", "GOZADOS", "CONSUMIDOS", "CONSUMED"]),
            balance: strings(&["RESTANDO", "SALDO", "DIAS RESTANTES", "BALANCE"]),
            months: strings(&["MESES", "MONTHS"]),
            window_start: strings(&[
                "AQUISITIVO INICIO",
                "INICIO AQUISITIVO",
                "PERIODO AQUISITIVO INICIO",
                "WINDOW START",
            ]),
            window_end: strings(&[
                "AQUISITIVO FIM",
                "FIM AQUISITIVO",
                "PERIODO AQUISITIVO FIM",
                "WINDOW END",
            ]),
            kind: strings(&["TIPO", "KIND"]),
            description: strings(&["DESCRICAO", "OBSERVACAO", "OBS", "DESCRIPTION"]),
            events: strings(&["EVENTS", "EVENTOS", "LICENCAS"]),
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Entitlement accrual rules.
    pub entitlement: EntitlementSettings,
    /// Urgency tier thresholds.
    pub urgency: UrgencyThresholds,
    /// Assignment defaulting rules.
    pub assignment: AssignmentSettings,
    /// Display conventions.
    pub display: DisplaySettings,
    /// Source field aliases.
    pub fields: FieldAliases,
}

impl EngineSettings {
    /// Checks that the settings describe a usable entitlement model.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the first offending
    /// setting.
    pub fn validate(&self) -> EngineResult<()> {
        let entitlement = &self.entitlement;
        positive("entitlement.quota_days", entitlement.quota_days)?;
        positive("entitlement.window_years", entitlement.window_years)?;
        positive(
            "entitlement.synthetic_window_count",
            entitlement.synthetic_window_count,
        )?;
        if entitlement.synthetic_window_count > MAX_SYNTHETIC_WINDOWS {
            return Err(invalid(
                "entitlement.synthetic_window_count",
                &format!("must not exceed {}", MAX_SYNTHETIC_WINDOWS),
            ));
        }
        positive(
            "entitlement.fallback_event_days",
            entitlement.fallback_event_days,
        )?;

        let urgency = &self.urgency;
        if urgency.critical_days < 0 {
            return Err(invalid("urgency.critical_days", "must not be negative"));
        }
        if urgency.high_days <= urgency.critical_days {
            return Err(invalid(
                "urgency.high_days",
                "must be greater than urgency.critical_days",
            ));
        }
        if urgency.moderate_days <= urgency.high_days {
            return Err(invalid(
                "urgency.moderate_days",
                "must be greater than urgency.high_days",
            ));
        }

        if self.assignment.fallback_label.trim().is_empty() {
            return Err(invalid("assignment.fallback_label", "must not be blank"));
        }

        let pattern = &self.display.date_pattern;
        if pattern.is_empty() || StrftimeItems::new(pattern).any(|item| item == Item::Error) {
            return Err(invalid(
                "display.date_pattern",
                &format!("'{}' is not a valid date pattern", pattern),
            ));
        }

        Ok(())
    }
}

fn positive(field: &str, value: u32) -> EngineResult<()> {
    if value == 0 {
        Err(invalid(field, "must be greater than zero"))
    } else {
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
