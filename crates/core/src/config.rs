use std::env;
use std::path::PathBuf;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{FreshnessError, Result};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key) {
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    /// File or directory holding table definition YAML files.
    pub tables_path: PathBuf,
    /// JSON snapshot of last-modified timestamps keyed by table ID.
    pub snapshot_path: PathBuf,
    /// Offset used for "now", e.g. `+09:00`. Process local zone when unset.
    pub utc_offset: Option<String>,
    /// Whether a table missing from the metadata source counts as a failure.
    pub fail_on_missing: bool,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `FRESHNESS_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("FRESHNESS_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            tables_path: PathBuf::from(profiled_env_or(p, "TABLES_PATH", "data/tables")),
            snapshot_path: PathBuf::from(profiled_env_or(
                p,
                "SNAPSHOT_PATH",
                "data/last_modified.json",
            )),
            utc_offset: profiled_env_opt(p, "UTC_OFFSET"),
            fail_on_missing: profiled_env_bool(p, "FAIL_ON_MISSING", true),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Parsed form of [`utc_offset`](Self::utc_offset).
    pub fn offset(&self) -> Result<Option<FixedOffset>> {
        self.utc_offset.as_deref().map(parse_utc_offset).transpose()
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  tables:      path={}", self.tables_path.display());
        tracing::info!("  snapshot:    path={}", self.snapshot_path.display());
        tracing::info!("  clock:       utc_offset={}", self.utc_offset.as_deref().unwrap_or("(local)"));
        tracing::info!("  policy:      fail_on_missing={}", self.fail_on_missing);
    }
}

/// Parse a UTC offset such as `+09:00`, `-0530`, `Z` or `UTC`.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("utc") || s == "Z" {
        return FixedOffset::east_opt(0)
            .ok_or_else(|| FreshnessError::Config("invalid zero offset".to_string()));
    }
    s.parse::<FixedOffset>()
        .map_err(|e| FreshnessError::Config(format!("invalid UTC_OFFSET '{}': {}", s, e)))
}
