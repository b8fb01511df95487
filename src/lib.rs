//! Premium Leave Entitlement Engine
//!
//! This crate enriches loosely-structured licença-prêmio records into a
//! consistent entitlement model: canonical leave events with temporal status
//! and urgency, acquisitive windows with quota and balance, and one rollup
//! per civil servant.

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod models;

pub use engine::PremiumLeaveEngine;
