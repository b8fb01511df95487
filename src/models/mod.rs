//! Core data models for the Premium Leave Engine.
//!
//! Raw input records, the canonical enriched event, acquisitive windows,
//! the per-servant aggregate and recovered-issue warnings.

mod acquisitive_window;
mod leave_event;
mod raw_record;
mod servant;
mod warning;

pub use acquisitive_window::{AcquisitiveWindow, WindowKind};
pub use leave_event::{EventStatus, LeaveEvent, UrgencyTier};
pub use raw_record::{RawRecord, RawServant, RawValue, canonical_key};
pub use servant::ServantAggregate;
pub use warning::{EnrichmentWarning, WarningCode};
