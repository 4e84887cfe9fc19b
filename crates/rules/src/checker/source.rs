//! Metadata source trait and the JSON snapshot implementation.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use freshness_core::{FreshnessError, Result};

/// Supplies the last-modified instant of a resolved table ID.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// Last modification of `table_id`, or `Ok(None)` if the table does not exist.
    async fn last_modified(&self, table_id: &str) -> Result<Option<DateTime<FixedOffset>>>;

    /// Human-readable name for this source (e.g., "snapshot").
    fn source_name(&self) -> &str;
}

/// [`MetadataSource`] backed by a JSON object mapping table IDs to RFC 3339 timestamps.
///
/// ```json
/// { "analytics-prod.exports.events_20210630": "2021-07-01T08:12:00+09:00" }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    entries: HashMap<String, DateTime<FixedOffset>>,
}

impl SnapshotSource {
    /// Read and parse a snapshot file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .map(|(table, value)| match DateTime::parse_from_rfc3339(&value) {
                Ok(ts) => Ok((table, ts)),
                Err(_) => Err(FreshnessError::InvalidTimestamp { table, value }),
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { entries })
    }

    /// Build from already-parsed entries.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, DateTime<FixedOffset>)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait::async_trait]
impl MetadataSource for SnapshotSource {
    async fn last_modified(&self, table_id: &str) -> Result<Option<DateTime<FixedOffset>>> {
        Ok(self.entries.get(table_id).copied())
    }

    fn source_name(&self) -> &str {
        "snapshot"
    }
}
