//! Individual threshold violations and their human-readable reasons.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

use crate::duration::format_duration;

/// One failed freshness check.
///
/// The `Display` output is the reason string handed to alerting; its wording
/// is matched downstream and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Today's cutoff has passed but the table was last written after it.
    CreatedAfterCutoff {
        /// Cutoff in the local time of the check.
        cutoff: NaiveDateTime,
        /// Last modification in its own local time.
        last_modified: NaiveDateTime,
    },
    /// The table is older than the allowed age.
    NotModifiedWithin {
        threshold: Duration,
        age: Duration,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::CreatedAfterCutoff { cutoff, last_modified } => write!(
                f,
                "The table should be created by {}, but last modified time is {}",
                cutoff.format("%H:%M"),
                last_modified.format("%H:%M"),
            ),
            Violation::NotModifiedWithin { threshold, age } => write!(
                f,
                "The table should be modified in {}, but not modified in {}",
                format_duration(*threshold),
                format_duration(*age),
            ),
        }
    }
}
