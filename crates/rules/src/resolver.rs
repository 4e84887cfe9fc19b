//! Resolve a table template into the concrete, date-suffixed table ID to check.
//!
//! Sharded tables get a `YYYYMMDD` suffix chosen by their [`DateForShards`]
//! policy. When a table has a [`TimeThreshold`](crate::schema::TimeThreshold)
//! and the check runs before today's cutoff, today's shard is not due yet, so
//! the reference date moves back one day before the policy is applied.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use tracing::debug;

use crate::schema::{DateForShards, TableConfig};

/// Table ID to inspect as of `now`.
///
/// Unsharded tables, and tables with an unrecognized shard policy, resolve to
/// `tc.table` unchanged.
pub fn resolve_table_id<Tz: TimeZone>(tc: &TableConfig, now: &DateTime<Tz>) -> String {
    match shard_date(tc, now) {
        Some(date) => format!("{}{}", tc.table, date.format("%Y%m%d")),
        None => tc.table.clone(),
    }
}

/// Calendar date the shard suffix refers to, or `None` for unsharded tables.
pub fn shard_date<Tz: TimeZone>(tc: &TableConfig, now: &DateTime<Tz>) -> Option<NaiveDate> {
    if !tc.date_for_shards.is_sharded() {
        return None;
    }

    let reference = reference_date(tc, now)?;
    match tc.date_for_shards {
        DateForShards::Today => Some(reference),
        DateForShards::OneDayAgo => reference.pred_opt(),
        DateForShards::FirstDayOfTheMonth => reference.with_day(1),
        DateForShards::Unsharded | DateForShards::Unrecognized(_) => None,
    }
}

/// `now`'s calendar date, moved back a day while today's cutoff is still ahead.
fn reference_date<Tz: TimeZone>(tc: &TableConfig, now: &DateTime<Tz>) -> Option<NaiveDate> {
    let today = now.date_naive();
    match &tc.time_threshold {
        Some(threshold) if *now < threshold.cutoff_on(now) => {
            debug!(
                table = %tc.table,
                threshold = %threshold,
                "before today's cutoff, using previous day's shard"
            );
            today.pred_opt()
        }
        _ => Some(today),
    }
}
