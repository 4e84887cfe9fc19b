//! Tests for the check pipeline.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use freshness_core::{FreshnessError, Result};

use super::*;
use crate::schema::{DateForShards, DurationThreshold, TableConfig, TimeThreshold};

fn tokyo() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn at(d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    tokyo().with_ymd_and_hms(2021, 7, d, h, mi, 0).unwrap()
}

/// Source that always fails.
struct BrokenSource;

#[async_trait::async_trait]
impl MetadataSource for BrokenSource {
    async fn last_modified(&self, _table_id: &str) -> Result<Option<DateTime<FixedOffset>>> {
        Err(FreshnessError::Metadata("backend unavailable".to_string()))
    }

    fn source_name(&self) -> &str {
        "broken"
    }
}

fn events() -> TableConfig {
    TableConfig::new("events_")
        .with_location("proj", "ds")
        .with_shards(DateForShards::OneDayAgo)
        .with_time_threshold(TimeThreshold::from_hms(9, 0, 0).unwrap())
}

fn users() -> TableConfig {
    TableConfig::new("users").with_duration_threshold(DurationThreshold::new(Duration::hours(1)))
}

#[tokio::test]
async fn fresh_table() {
    let source = SnapshotSource::from_entries([("proj.ds.events_20210630", at(1, 8, 30))]);
    let checker = Checker::new(Arc::new(source));

    let report = checker.check(&events(), &at(1, 10, 0)).await;
    assert_eq!(report.template, "proj.ds.events_");
    assert_eq!(report.table_id, "proj.ds.events_20210630");
    assert_eq!(report.last_modified, Some(at(1, 8, 30)));
    assert_eq!(report.status, CheckStatus::Fresh);
    assert!(!report.is_failure(true));
}

#[tokio::test]
async fn stale_table_carries_reasons() {
    let source = SnapshotSource::from_entries([("users", at(1, 8, 0))]);
    let checker = Checker::new(Arc::new(source));

    let report = checker.check(&users(), &at(1, 10, 30)).await;
    assert_eq!(
        report.status,
        CheckStatus::Stale {
            reasons: vec![
                "The table should be modified in 1h0m0s, but not modified in 2h30m0s".to_string()
            ],
        }
    );
    assert!(report.is_failure(false));
}

#[tokio::test]
async fn before_cutoff_checks_previous_shard() {
    // 08:00 is before the 09:00 cutoff, so ONE_DAY_AGO looks two days back.
    let source = SnapshotSource::from_entries([("proj.ds.events_20210629", at(30, 8, 45))]);
    let checker = Checker::new(Arc::new(source));

    let report = checker.check(&events(), &at(1, 8, 0)).await;
    assert_eq!(report.table_id, "proj.ds.events_20210629");
    assert_eq!(report.status, CheckStatus::Fresh);
}

#[tokio::test]
async fn missing_table() {
    let checker = Checker::new(Arc::new(SnapshotSource::default()));

    let report = checker.check(&users(), &at(1, 10, 0)).await;
    assert_eq!(report.status, CheckStatus::Missing);
    assert!(report.last_modified.is_none());
    assert!(report.is_failure(true));
    assert!(!report.is_failure(false));
}

#[tokio::test]
async fn source_error_is_reported() {
    let checker = Checker::new(Arc::new(BrokenSource));

    let report = checker.check(&users(), &at(1, 10, 0)).await;
    assert_eq!(
        report.status,
        CheckStatus::Error {
            message: "Metadata backend error: backend unavailable".to_string()
        }
    );
    assert!(report.is_failure(false));
}

#[tokio::test]
async fn check_all_preserves_order() {
    let source = SnapshotSource::from_entries([
        ("users", at(1, 9, 45)),
        ("proj.ds.events_20210630", at(1, 8, 0)),
    ]);
    let checker = Checker::new(Arc::new(source));
    let tables = vec![users(), TableConfig::new("ghost"), events()];

    let reports = checker.check_all(&tables, &at(1, 10, 0)).await;
    let ids: Vec<_> = reports.iter().map(|r| r.table_id.as_str()).collect();
    assert_eq!(ids, vec!["users", "ghost", "proj.ds.events_20210630"]);
    assert_eq!(reports[1].status, CheckStatus::Missing);
}

// ── snapshot source ─────────────────────────────────────────────────

#[tokio::test]
async fn snapshot_from_json() {
    let source = SnapshotSource::from_json(
        r#"{ "users": "2021-07-01T09:45:00+09:00", "orders": "2021-07-01T00:00:00Z" }"#,
    )
    .unwrap();
    assert_eq!(source.len(), 2);
    assert_eq!(source.last_modified("users").await.unwrap(), Some(at(1, 9, 45)));
    assert_eq!(source.last_modified("nope").await.unwrap(), None);
}

#[test]
fn snapshot_rejects_bad_timestamps() {
    let err = SnapshotSource::from_json(r#"{ "users": "yesterday" }"#).unwrap_err();
    match err {
        FreshnessError::InvalidTimestamp { table, value } => {
            assert_eq!(table, "users");
            assert_eq!(value, "yesterday");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn snapshot_rejects_malformed_json() {
    assert!(matches!(
        SnapshotSource::from_json("[1, 2"),
        Err(FreshnessError::Serialize(_))
    ));
}

// ── report rendering ────────────────────────────────────────────────

#[test]
fn report_display_and_json() {
    let report = CheckReport {
        template: "users".to_string(),
        table_id: "users".to_string(),
        last_modified: Some(at(1, 8, 0)),
        status: CheckStatus::Stale {
            reasons: vec!["too old".to_string()],
        },
    };
    assert_eq!(report.to_string(), "STALE   users\n        too old");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "stale");
    assert_eq!(json["reasons"][0], "too old");
    assert_eq!(json["last_modified"], "2021-07-01T08:00:00+09:00");
}
