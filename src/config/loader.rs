//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::EngineSettings;

/// Loads and validates engine settings.
///
/// # File Layout
///
/// ```text
/// config/premium_leave.yaml
/// ├── entitlement   # quota, window length, placeholder count
/// ├── urgency       # tier thresholds in days
/// ├── assignment    # lotação fallback and generic unit block-list
/// ├── display       # date pattern, placeholders, default kind
/// └── fields        # accepted source column names
/// ```
///
/// Any section may be omitted; omitted values take their defaults.
///
/// # Example
///
/// ```no_run
/// use premium_leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/premium_leave.yaml")?;
/// println!("Quota per window: {}", loader.settings().entitlement.quota_days);
/// # Ok::<(), premium_leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads settings from the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file cannot be read
    /// - [`EngineError::ConfigParseError`] if the file is not valid YAML for
    ///   [`EngineSettings`]
    /// - [`EngineError::InvalidConfig`] if a value is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::parse(&content, &path_str)?;
        debug!(path = %path_str, "Loaded premium leave configuration");
        Ok(loader)
    }

    /// Parses settings from YAML text.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load`], minus the file lookup.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> EngineResult<Self> {
        let settings: EngineSettings =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Consumes the loader, returning the settings.
    pub fn into_settings(self) -> EngineSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_path() -> &'static str {
        "./config/premium_leave.yaml"
    }

    #[test]
    fn test_load_reference_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().entitlement.quota_days, 90);
        assert_eq!(loader.settings().entitlement.window_years, 5);
        assert_eq!(loader.settings().urgency.critical_days, 30);
        assert_eq!(
            loader.settings().assignment.fallback_label,
            "No assignment"
        );
    }

    #[test]
    fn test_reference_configuration_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.into_settings(), EngineSettings::default());
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/premium_leave.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("premium_leave.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let result = ConfigLoader::from_yaml_str("entitlement: [not, a, map");

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert_eq!(path, "<inline>");
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_returns_parse_error() {
        let result = ConfigLoader::from_yaml_str("entitlement:\n  quota_days: ninety\n");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_out_of_range_value_returns_invalid_config() {
        let result = ConfigLoader::from_yaml_str("entitlement:\n  window_years: 0\n");

        match result {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "entitlement.window_years");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_generic_units_override_defaults() {
        let yaml = "assignment:\n  generic_units: [\"SEFAZ\"]\n";
        let loader = ConfigLoader::from_yaml_str(yaml).unwrap();

        assert_eq!(loader.settings().assignment.generic_units, vec!["SEFAZ"]);
        assert_eq!(
            loader.settings().assignment.fallback_label,
            "No assignment"
        );
    }
}
