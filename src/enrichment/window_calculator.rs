//! Acquisitive window reconstruction.
//!
//! When a servant's events carry window metadata, the recorded windows are
//! rebuilt from it, folded into a non-overlapping sequence and followed by
//! one projected cycle. Without metadata, one-year synthetic placeholders
//! are generated instead.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use tracing::debug;

use crate::config::{EntitlementSettings, MAX_SYNTHETIC_WINDOWS};
use crate::models::{AcquisitiveWindow, EnrichmentWarning, LeaveEvent, WarningCode, WindowKind};

/// The result of window reconstruction for one servant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCalculationResult {
    /// Windows ordered by start date, pairwise non-overlapping.
    pub windows: Vec<AcquisitiveWindow>,
    /// Data issues recovered while building the windows.
    pub warnings: Vec<EnrichmentWarning>,
}

/// Composite window identity, compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct WindowKey {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default)]
struct Usage {
    consumed: u32,
    events: usize,
}

impl Usage {
    fn record(self, event: &LeaveEvent) -> Self {
        Self {
            consumed: self.consumed.saturating_add(event.days_consumed),
            events: self.events + 1,
        }
    }

    fn merge(self, other: Usage) -> Self {
        Self {
            consumed: self.consumed.saturating_add(other.consumed),
            events: self.events + other.events,
        }
    }
}

/// Builds the acquisitive windows for one servant's events.
///
/// # Example
///
/// ```
/// use premium_leave_engine::config::EntitlementSettings;
/// use premium_leave_engine::enrichment::calculate_windows;
/// use premium_leave_engine::models::WindowKind;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let result = calculate_windows(&[], &EntitlementSettings::default(), today);
///
/// assert_eq!(result.windows.len(), 5);
/// assert!(result.windows.iter().all(|w| w.kind == WindowKind::Synthetic));
/// assert_eq!(result.windows[4].label, "2025");
/// ```
pub fn calculate_windows(
    events: &[LeaveEvent],
    settings: &EntitlementSettings,
    today: NaiveDate,
) -> WindowCalculationResult {
    let keys: Vec<Option<WindowKey>> = events
        .iter()
        .map(|event| window_key(event, settings.window_years))
        .collect();

    if keys.iter().all(Option::is_none) {
        debug!(event_count = events.len(), "No window metadata; using synthetic windows");
        return WindowCalculationResult {
            windows: synthetic_windows(events, settings, today),
            warnings: Vec::new(),
        };
    }

    let mut warnings = Vec::new();

    let folded: BTreeMap<WindowKey, Usage> = events
        .iter()
        .zip(&keys)
        .filter_map(|(event, key)| key.map(|key| (key, event)))
        .fold(BTreeMap::new(), |mut acc, (key, event)| {
            let usage = acc.entry(key).or_default();
            *usage = usage.record(event);
            acc
        });

    let mut recorded: Vec<(WindowKey, Usage)> = Vec::with_capacity(folded.len());
    for (key, usage) in folded {
        if let Some((previous, previous_usage)) = recorded
            .last_mut()
            .filter(|(previous, _)| key.start <= previous.end)
        {
            warnings.push(EnrichmentWarning::general(
                WarningCode::OverlappingWindow,
                format!(
                    "window {}..{} overlaps {}..{}; folded into the earlier window",
                    key.start, key.end, previous.start, previous.end
                ),
            ));
            previous.end = previous.end.max(key.end);
            *previous_usage = previous_usage.merge(usage);
            continue;
        }
        recorded.push((key, usage));
    }

    for (event, _) in events.iter().zip(&keys).filter(|(_, key)| key.is_none()) {
        match recorded
            .iter_mut()
            .find(|(key, _)| event.start >= key.start && event.start <= key.end)
        {
            Some((_, usage)) => *usage = usage.record(event),
            None => warnings.push(EnrichmentWarning::general(
                WarningCode::UnattributedEvent,
                format!(
                    "event starting {} falls outside every recorded window",
                    event.start
                ),
            )),
        }
    }

    let mut windows: Vec<AcquisitiveWindow> = recorded
        .iter()
        .map(|(key, usage)| {
            AcquisitiveWindow::new(
                WindowKind::Recorded,
                key.start,
                key.end,
                settings.quota_days,
                usage.consumed,
                usage.events,
                today,
            )
        })
        .collect();

    if let Some(projected) = recorded
        .last()
        .and_then(|(last, _)| projected_window(last.end, settings, today))
    {
        windows.push(projected);
    }

    WindowCalculationResult { windows, warnings }
}

/// Resolves an event's window bounds, completing a missing bound from the
/// other. Inverted pairs yield no key.
fn window_key(event: &LeaveEvent, window_years: u32) -> Option<WindowKey> {
    let (start, end) = match (event.window_start, event.window_end) {
        (Some(start), Some(end)) => (start, end),
        (Some(start), None) => (start, window_end_from(start, window_years)?),
        (None, Some(end)) => (window_start_from(end, window_years)?, end),
        (None, None) => return None,
    };
    (start <= end).then_some(WindowKey { start, end })
}

fn window_end_from(start: NaiveDate, window_years: u32) -> Option<NaiveDate> {
    start
        .checked_add_months(Months::new(window_years.saturating_mul(12)))?
        .pred_opt()
}

fn window_start_from(end: NaiveDate, window_years: u32) -> Option<NaiveDate> {
    end.checked_sub_months(Months::new(window_years.saturating_mul(12)))?
        .succ_opt()
}

fn projected_window(
    last_end: NaiveDate,
    settings: &EntitlementSettings,
    today: NaiveDate,
) -> Option<AcquisitiveWindow> {
    let start = last_end.succ_opt()?;
    let end = window_end_from(start, settings.window_years)?;
    Some(AcquisitiveWindow::new(
        WindowKind::Projected,
        start,
        end,
        settings.quota_days,
        0,
        0,
        today,
    ))
}

/// One calendar-year placeholder per year, ending at the reference year.
///
/// Events are counted against the window of their start year, clamped to the
/// nearest placeholder. Consumption stays at zero.
fn synthetic_windows(
    events: &[LeaveEvent],
    settings: &EntitlementSettings,
    today: NaiveDate,
) -> Vec<AcquisitiveWindow> {
    let last_year = today.year();
    let count = settings
        .synthetic_window_count
        .clamp(1, MAX_SYNTHETIC_WINDOWS);
    let count = i32::try_from(count).unwrap_or(1);
    let first_year = last_year.saturating_sub(count - 1);

    (first_year..=last_year)
        .filter_map(|year| {
            let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
            let event_count = events
                .iter()
                .filter(|event| event.start.year().clamp(first_year, last_year) == year)
                .count();
            Some(AcquisitiveWindow::new(
                WindowKind::Synthetic,
                start,
                end,
                settings.quota_days,
                0,
                event_count,
                today,
            ))
        })
        .collect()
}
