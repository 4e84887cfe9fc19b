//! Per-table check results.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Result of checking one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    /// Qualified template from the definition file.
    pub template: String,
    /// Qualified, date-resolved table ID that was checked.
    pub table_id: String,
    /// Last modification reported by the metadata source, if any.
    pub last_modified: Option<DateTime<FixedOffset>>,
    #[serde(flatten)]
    pub status: CheckStatus,
}

/// Verdict for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckStatus {
    /// All configured thresholds passed.
    Fresh,
    /// At least one threshold failed.
    Stale { reasons: Vec<String> },
    /// The metadata source does not know the resolved table.
    Missing,
    /// The metadata source failed.
    Error { message: String },
}

impl CheckReport {
    /// Whether this report should fail the run.
    pub fn is_failure(&self, fail_on_missing: bool) -> bool {
        match self.status {
            CheckStatus::Fresh => false,
            CheckStatus::Missing => fail_on_missing,
            CheckStatus::Stale { .. } | CheckStatus::Error { .. } => true,
        }
    }
}

impl CheckStatus {
    /// Short upper-case label for terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Fresh => "OK",
            CheckStatus::Stale { .. } => "STALE",
            CheckStatus::Missing => "MISSING",
            CheckStatus::Error { .. } => "ERROR",
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<7} {}", self.status.label(), self.table_id)?;
        match &self.status {
            CheckStatus::Stale { reasons } => {
                for reason in reasons {
                    write!(f, "\n        {}", reason)?;
                }
            }
            CheckStatus::Error { message } => write!(f, "\n        {}", message)?,
            CheckStatus::Fresh | CheckStatus::Missing => {}
        }
        Ok(())
    }
}
