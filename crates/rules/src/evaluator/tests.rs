//! Tests for the staleness evaluator.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

use super::*;
use crate::schema::{DurationThreshold, TableConfig, TimeThreshold};

fn tokyo() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    tokyo().with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn time_only(hour: u32) -> TableConfig {
    TableConfig::new("t").with_time_threshold(TimeThreshold::from_hms(hour, 0, 0).unwrap())
}

fn duration_only(d: Duration) -> TableConfig {
    TableConfig::new("t").with_duration_threshold(DurationThreshold::new(d))
}

fn both(hour: u32, d: Duration) -> TableConfig {
    time_only(hour).with_duration_threshold(DurationThreshold::new(d))
}

// ── time threshold ──────────────────────────────────────────────────

#[test]
fn modified_before_cutoff_is_fresh() {
    let (old, reasons) = is_old(&time_only(12), &at(2020, 1, 1, 12, 30), &at(2020, 1, 1, 11, 0));
    assert!(!old);
    assert!(reasons.is_empty());
}

#[test]
fn modified_after_cutoff_is_stale() {
    let (old, reasons) = is_old(&time_only(11), &at(2020, 1, 1, 12, 30), &at(2020, 1, 1, 12, 0));
    assert!(old);
    assert_eq!(
        reasons,
        vec!["The table should be created by 11:00, but last modified time is 12:00"]
    );
}

#[test]
fn modified_exactly_at_cutoff_is_fresh() {
    let (old, _) = is_old(&time_only(11), &at(2020, 1, 1, 12, 30), &at(2020, 1, 1, 11, 0));
    assert!(!old);
}

#[test]
fn current_exactly_at_cutoff_is_checked() {
    let tc = time_only(11);
    let modified = at(2020, 1, 1, 11, 0) + Duration::seconds(1);
    let current = at(2020, 1, 1, 11, 0);
    // last_modified cannot normally be after current, but the comparison must still run.
    let evaluation = evaluate(&tc, &current, &modified);
    assert!(evaluation.is_old());
}

#[test]
fn before_cutoff_with_previous_day_modification_is_fresh() {
    let (old, reasons) = is_old(&time_only(12), &at(2020, 1, 1, 11, 30), &at(2019, 12, 31, 11, 0));
    assert!(!old);
    assert!(reasons.is_empty());
}

#[test]
fn before_cutoff_never_reports_time_violation() {
    // Yesterday 12:00 is later than a cutoff of 11:00, but today's 11:00 has not arrived.
    let (old, reasons) = is_old(&time_only(11), &at(2020, 1, 1, 10, 30), &at(2019, 12, 31, 12, 0));
    assert!(!old);
    assert!(reasons.is_empty());
}

#[test]
fn time_reason_renders_each_instant_in_its_own_zone() {
    let tc = time_only(11);
    let current = at(2020, 1, 1, 12, 30);
    // 03:00 UTC == 12:00 Tokyo, after the 11:00 Tokyo cutoff.
    let modified = Utc.with_ymd_and_hms(2020, 1, 1, 3, 0, 0).unwrap();

    let (old, reasons) = is_old(&tc, &current, &modified);
    assert!(old);
    assert_eq!(
        reasons,
        vec!["The table should be created by 11:00, but last modified time is 03:00"]
    );
}

#[test]
fn time_threshold_compares_instants_not_wall_clocks() {
    let tc = time_only(11);
    let current = at(2020, 1, 1, 12, 30);
    // 10:00 UTC is 19:00 Tokyo: after the cutoff despite the earlier wall clock.
    let modified = Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap();
    let (old, _) = is_old(&tc, &current, &modified);
    assert!(old);

    // 01:00 UTC is 10:00 Tokyo: before the cutoff.
    let modified = Utc.with_ymd_and_hms(2020, 1, 1, 1, 0, 0).unwrap();
    let (old, _) = is_old(&tc, &current, &modified);
    assert!(!old);
}

// ── duration threshold ──────────────────────────────────────────────

#[test]
fn age_within_duration_is_fresh() {
    let (old, reasons) = is_old(
        &duration_only(Duration::hours(1)),
        &at(2020, 1, 1, 11, 30),
        &at(2020, 1, 1, 11, 0),
    );
    assert!(!old);
    assert!(reasons.is_empty());
}

#[test]
fn age_over_duration_is_stale() {
    let (old, reasons) = is_old(
        &duration_only(Duration::hours(1)),
        &at(2020, 1, 1, 12, 30),
        &at(2020, 1, 1, 11, 0),
    );
    assert!(old);
    assert_eq!(
        reasons,
        vec!["The table should be modified in 1h0m0s, but not modified in 1h30m0s"]
    );
}

#[test]
fn age_equal_to_duration_is_fresh() {
    let (old, _) = is_old(
        &duration_only(Duration::hours(1)),
        &at(2020, 1, 1, 12, 0),
        &at(2020, 1, 1, 11, 0),
    );
    assert!(!old);
}

#[test]
fn age_is_measured_across_zones() {
    // 02:00 UTC == 11:00 Tokyo; checked at 11:45 Tokyo.
    let modified = Utc.with_ymd_and_hms(2020, 1, 1, 2, 0, 0).unwrap();
    let (old, _) = is_old(&duration_only(Duration::hours(1)), &at(2020, 1, 1, 11, 45), &modified);
    assert!(!old);
}

// ── combined ────────────────────────────────────────────────────────

#[test]
fn both_thresholds_pass() {
    let (old, reasons) = is_old(
        &both(11, Duration::hours(1)),
        &at(2020, 1, 1, 11, 30),
        &at(2020, 1, 1, 11, 0),
    );
    assert!(!old);
    assert!(reasons.is_empty());
}

#[test]
fn both_thresholds_fail_in_order() {
    let (old, reasons) = is_old(
        &both(10, Duration::hours(1)),
        &at(2020, 1, 1, 12, 30),
        &at(2020, 1, 1, 11, 0),
    );
    assert!(old);
    assert_eq!(
        reasons,
        vec![
            "The table should be created by 10:00, but last modified time is 11:00",
            "The table should be modified in 1h0m0s, but not modified in 1h30m0s",
        ]
    );
}

#[test]
fn only_duration_fails_when_both_configured() {
    let evaluation = evaluate(
        &both(12, Duration::hours(1)),
        &at(2020, 1, 1, 12, 30),
        &at(2020, 1, 1, 11, 0),
    );
    assert_eq!(
        evaluation.violations,
        vec![Violation::NotModifiedWithin {
            threshold: Duration::hours(1),
            age: Duration::minutes(90),
        }]
    );
}

#[test]
fn no_thresholds_is_never_stale() {
    let tc = TableConfig::new("t");
    let (old, reasons) = is_old(&tc, &at(2020, 1, 1, 12, 30), &at(2000, 1, 1, 0, 0));
    assert!(!old);
    assert!(reasons.is_empty());
}

#[test]
fn evaluation_is_idempotent() {
    let tc = both(10, Duration::hours(1));
    let current = at(2020, 1, 1, 12, 30);
    let modified = at(2020, 1, 1, 11, 0);
    assert_eq!(is_old(&tc, &current, &modified), is_old(&tc, &current, &modified));
}

#[test]
fn table_config_shorthand() {
    let tc = duration_only(Duration::hours(1));
    assert_eq!(
        tc.is_old(&at(2020, 1, 1, 12, 30), &at(2020, 1, 1, 11, 0)),
        is_old(&tc, &at(2020, 1, 1, 12, 30), &at(2020, 1, 1, 11, 0)),
    );
}
