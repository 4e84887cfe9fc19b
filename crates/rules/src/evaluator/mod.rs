//! Staleness evaluator.
//!
//! Two independent checks, each enabled by its threshold being configured:
//! - **Time threshold**: once today's cutoff has passed, the last modification
//!   must not be later than the cutoff.
//! - **Duration threshold**: the table's age at check time must not exceed
//!   the allowed duration.
//!
//! Violations accumulate in that order. No thresholds means never stale.

mod violation;

#[cfg(test)]
mod tests;

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use crate::schema::{DurationThreshold, TableConfig, TimeThreshold};

pub use violation::Violation;

/// Outcome of evaluating one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub violations: Vec<Violation>,
}

impl Evaluation {
    /// Whether any check failed.
    pub fn is_old(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Reason strings in check order.
    pub fn reasons(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Evaluate `tc`'s thresholds for a table checked at `current` and last written at `last_modified`.
///
/// Each instant is interpreted in its own zone: the cutoff is projected onto
/// `current`'s local date, and reasons render `last_modified` in its own local time.
pub fn evaluate<Tz: TimeZone, Tz2: TimeZone>(
    tc: &TableConfig,
    current: &DateTime<Tz>,
    last_modified: &DateTime<Tz2>,
) -> Evaluation {
    let violations: Vec<Violation> = [
        tc.time_threshold
            .as_ref()
            .and_then(|t| check_time_threshold(t, current, last_modified)),
        tc.duration_threshold
            .as_ref()
            .and_then(|d| check_duration_threshold(d, current, last_modified)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !violations.is_empty() {
        debug!(table = %tc.table, violations = violations.len(), "table is stale");
    }
    Evaluation { violations }
}

/// `(is_old, reasons)` for a table; see [`evaluate`].
pub fn is_old<Tz: TimeZone, Tz2: TimeZone>(
    tc: &TableConfig,
    current: &DateTime<Tz>,
    last_modified: &DateTime<Tz2>,
) -> (bool, Vec<String>) {
    let evaluation = evaluate(tc, current, last_modified);
    (evaluation.is_old(), evaluation.reasons())
}

fn check_time_threshold<Tz: TimeZone, Tz2: TimeZone>(
    threshold: &TimeThreshold,
    current: &DateTime<Tz>,
    last_modified: &DateTime<Tz2>,
) -> Option<Violation> {
    let cutoff = threshold.cutoff_on(current);
    // Before today's cutoff nothing is due yet.
    if *current < cutoff {
        return None;
    }
    if last_modified.with_timezone(&Utc) <= cutoff.with_timezone(&Utc) {
        return None;
    }
    Some(Violation::CreatedAfterCutoff {
        cutoff: cutoff.naive_local(),
        last_modified: last_modified.naive_local(),
    })
}

fn check_duration_threshold<Tz: TimeZone, Tz2: TimeZone>(
    threshold: &DurationThreshold,
    current: &DateTime<Tz>,
    last_modified: &DateTime<Tz2>,
) -> Option<Violation> {
    let age = current.with_timezone(&Utc) - last_modified.with_timezone(&Utc);
    if age <= threshold.duration {
        return None;
    }
    Some(Violation::NotModifiedWithin {
        threshold: threshold.duration,
        age,
    })
}
