//! Shard-date policy for date-suffixed tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which calendar date a sharded table's `YYYYMMDD` suffix refers to.
///
/// Values outside the known set deserialize into [`Unrecognized`](Self::Unrecognized)
/// rather than failing, and resolve exactly like [`Unsharded`](Self::Unsharded):
/// a typo in an existing config yields the bare template instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DateForShards {
    /// No date suffix (`""`).
    #[default]
    Unsharded,
    /// Shard for the current day (`TODAY`).
    Today,
    /// Shard for the previous day (`ONE_DAY_AGO`).
    OneDayAgo,
    /// Shard for the first day of the current month (`FIRST_DAY_OF_THE_MONTH`).
    FirstDayOfTheMonth,
    /// Any other value, kept verbatim for diagnostics.
    Unrecognized(String),
}

impl DateForShards {
    /// Configuration spelling of this policy.
    pub fn as_str(&self) -> &str {
        match self {
            DateForShards::Unsharded => "",
            DateForShards::Today => "TODAY",
            DateForShards::OneDayAgo => "ONE_DAY_AGO",
            DateForShards::FirstDayOfTheMonth => "FIRST_DAY_OF_THE_MONTH",
            DateForShards::Unrecognized(raw) => raw,
        }
    }

    /// Whether a date suffix gets appended.
    pub fn is_sharded(&self) -> bool {
        matches!(
            self,
            DateForShards::Today | DateForShards::OneDayAgo | DateForShards::FirstDayOfTheMonth
        )
    }
}

impl fmt::Display for DateForShards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DateForShards {
    fn from(s: &str) -> Self {
        match s.trim() {
            "" => DateForShards::Unsharded,
            "TODAY" => DateForShards::Today,
            "ONE_DAY_AGO" => DateForShards::OneDayAgo,
            "FIRST_DAY_OF_THE_MONTH" => DateForShards::FirstDayOfTheMonth,
            _ => DateForShards::Unrecognized(s.to_string()),
        }
    }
}

impl From<String> for DateForShards {
    fn from(s: String) -> Self {
        DateForShards::from(s.as_str())
    }
}

impl From<DateForShards> for String {
    fn from(d: DateForShards) -> Self {
        match d {
            DateForShards::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}
