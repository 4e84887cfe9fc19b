//! freshness-check — check monitored tables against their freshness thresholds.
//!
//! Loads table definitions, resolves each table's ID for the current day,
//! looks up its last modification in a metadata snapshot, and prints one
//! verdict per table. Exits with status 1 when any table fails.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::Parser;
use tracing::{info, warn};

use freshness_core::config::load_dotenv;
use freshness_core::Config;
use freshness_rules::checker::{CheckReport, Checker, SnapshotSource};
use freshness_rules::loader::{LoadStatus, TableLoader};
use freshness_rules::schema::TableConfig;

// ── CLI ─────────────────────────────────────────────────────────────

/// Check date-sharded tables for staleness.
#[derive(Parser, Debug)]
#[command(name = "freshness-check", version, about)]
struct Cli {
    /// Table definition file or directory (overrides TABLES_PATH).
    #[arg(long)]
    tables: Option<PathBuf>,

    /// JSON snapshot of last-modified timestamps (overrides SNAPSHOT_PATH).
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// UTC offset for "now", e.g. +09:00 (overrides UTC_OFFSET).
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,

    /// Evaluate as of this RFC 3339 instant instead of the current time.
    #[arg(long)]
    at: Option<String>,

    /// Do not fail the run for tables missing from the snapshot.
    #[arg(long)]
    allow_missing: bool,

    /// Print reports as a JSON array.
    #[arg(long)]
    json: bool,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(path) = cli.tables.clone() {
        config.tables_path = path;
    }
    if let Some(path) = cli.snapshot.clone() {
        config.snapshot_path = path;
    }
    if cli.utc_offset.is_some() {
        config.utc_offset = cli.utc_offset.clone();
    }
    if cli.allow_missing {
        config.fail_on_missing = false;
    }
    config.log_summary();

    let tables = load_tables(&config)?;
    let source = SnapshotSource::from_file(&config.snapshot_path)
        .with_context(|| format!("failed to read snapshot {}", config.snapshot_path.display()))?;
    info!(entries = source.len(), "loaded metadata snapshot");
    let checker = Checker::new(Arc::new(source));

    let reports = if let Some(at) = cli.at.as_deref() {
        let now = DateTime::parse_from_rfc3339(at)
            .with_context(|| format!("invalid --at timestamp '{}'", at))?;
        run(&checker, &tables, now).await
    } else if let Some(offset) = config.offset()? {
        run(&checker, &tables, Utc::now().with_timezone(&offset)).await
    } else {
        run(&checker, &tables, Local::now()).await
    };

    print_reports(&reports, cli.json)?;

    let failures = reports
        .iter()
        .filter(|r| r.is_failure(config.fail_on_missing))
        .count();
    if failures > 0 {
        warn!(failures, total = reports.len(), "freshness check failed");
        return Ok(ExitCode::FAILURE);
    }
    info!(total = reports.len(), "all tables fresh");
    Ok(ExitCode::SUCCESS)
}

fn load_tables(config: &Config) -> Result<Vec<TableConfig>> {
    let mut loader = TableLoader::new(config.tables_path.clone());
    let results = loader
        .load_all()
        .with_context(|| format!("failed to load tables from {}", config.tables_path.display()))?;

    let failed: Vec<_> = results
        .iter()
        .filter_map(|r| match &r.status {
            LoadStatus::Failed { error } => Some(format!("{}: {}", r.path.display(), error)),
            _ => None,
        })
        .collect();
    if !failed.is_empty() {
        anyhow::bail!("invalid table definitions:\n  {}", failed.join("\n  "));
    }

    let tables = loader.into_tables();
    info!(count = tables.len(), "loaded table definitions");
    Ok(tables)
}

async fn run<Tz: TimeZone>(
    checker: &Checker,
    tables: &[TableConfig],
    now: DateTime<Tz>,
) -> Vec<CheckReport> {
    info!(now = %now.naive_local(), "checking tables");
    checker.check_all(tables, &now).await
}

fn print_reports(reports: &[CheckReport], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
    } else {
        for report in reports {
            println!("{}", report);
        }
    }
    Ok(())
}
