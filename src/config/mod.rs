//! Configuration loading and management for the Premium Leave Engine.
//!
//! Settings cover the entitlement rules (quota, window length), urgency
//! thresholds, assignment defaulting, display conventions and the source
//! column aliases the enricher recognises.
//!
//! # Example
//!
//! ```no_run
//! use premium_leave_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/premium_leave.yaml").unwrap();
//! println!("Window length: {} years", loader.settings().entitlement.window_years);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AssignmentSettings, DisplaySettings, EngineSettings, EntitlementSettings, FieldAliases,
    MAX_SYNTHETIC_WINDOWS, UrgencyThresholds,
};
