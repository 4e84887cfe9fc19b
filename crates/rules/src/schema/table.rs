//! Monitored table definition.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::{DateForShards, DurationThreshold, TimeThreshold};

/// A single monitored table as written in a table definition file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Warehouse project; only used to qualify the resolved ID.
    #[serde(default)]
    pub project: Option<String>,
    /// Dataset / schema holding the table.
    #[serde(default)]
    pub dataset: Option<String>,
    /// Table name, or the shard prefix for date-sharded tables.
    pub table: String,
    #[serde(default, alias = "dateForShards")]
    pub date_for_shards: DateForShards,
    #[serde(default, alias = "timeThreshold")]
    pub time_threshold: Option<TimeThreshold>,
    #[serde(default, alias = "durationThreshold")]
    pub duration_threshold: Option<DurationThreshold>,
}

/// Top-level layout of a table definition YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TableFile {
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

impl TableConfig {
    /// An unsharded table with no thresholds.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            project: None,
            dataset: None,
            table: table.into(),
            date_for_shards: DateForShards::Unsharded,
            time_threshold: None,
            duration_threshold: None,
        }
    }

    pub fn with_shards(mut self, date_for_shards: DateForShards) -> Self {
        self.date_for_shards = date_for_shards;
        self
    }

    pub fn with_time_threshold(mut self, threshold: TimeThreshold) -> Self {
        self.time_threshold = Some(threshold);
        self
    }

    pub fn with_duration_threshold(mut self, threshold: DurationThreshold) -> Self {
        self.duration_threshold = Some(threshold);
        self
    }

    pub fn with_location(mut self, project: impl Into<String>, dataset: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self.dataset = Some(dataset.into());
        self
    }

    /// Prefix `name` with whichever of project and dataset are set.
    pub fn qualify(&self, name: &str) -> String {
        [self.project.as_deref(), self.dataset.as_deref(), Some(name)]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Qualified template, used to identify the definition itself.
    pub fn template_id(&self) -> String {
        self.qualify(&self.table)
    }

    /// Shorthand for [`crate::resolver::resolve_table_id`].
    pub fn table_id<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String {
        crate::resolver::resolve_table_id(self, now)
    }

    /// Shorthand for [`crate::evaluator::is_old`].
    pub fn is_old<Tz: TimeZone, Tz2: TimeZone>(
        &self,
        current: &DateTime<Tz>,
        last_modified: &DateTime<Tz2>,
    ) -> (bool, Vec<String>) {
        crate::evaluator::is_old(self, current, last_modified)
    }
}
