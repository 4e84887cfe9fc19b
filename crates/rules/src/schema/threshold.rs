//! Freshness thresholds: a daily time-of-day cutoff and a maximum age.

use std::fmt;

use chrono::{DateTime, Duration, NaiveTime, Offset, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::duration::{format_duration, parse_duration};

// ── Time threshold ───────────────────────────────────────────────────

/// Wall-clock time by which a table is expected to be written each day.
///
/// Only hour, minute and second are meaningful. The date is supplied at
/// evaluation time via [`cutoff_on`](Self::cutoff_on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeThreshold {
    pub time: NaiveTime,
}

impl TimeThreshold {
    pub fn new(time: NaiveTime) -> Self {
        Self { time }
    }

    /// Build from hour/minute/second; `None` when out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self::new)
    }

    /// Project this time of day onto the calendar date of `day`, in `day`'s zone.
    ///
    /// Sub-second precision is dropped. A time that is ambiguous on that date
    /// resolves to the earlier instant; a time that falls into a gap keeps the
    /// UTC offset `day` itself carries.
    pub fn cutoff_on<Tz: TimeZone>(&self, day: &DateTime<Tz>) -> DateTime<Tz> {
        let time = self.time.with_nanosecond(0).unwrap_or(self.time);
        let local = day.date_naive().and_time(time);
        let tz = day.timezone();
        match tz.from_local_datetime(&local) {
            chrono::LocalResult::Single(dt) => dt,
            chrono::LocalResult::Ambiguous(earliest, _) => earliest,
            chrono::LocalResult::None => {
                let offset = day.offset().fix().local_minus_utc();
                tz.from_utc_datetime(&(local - Duration::seconds(i64::from(offset))))
            }
        }
    }
}

impl TryFrom<String> for TimeThreshold {
    type Error = String;

    /// Accepts `HH:MM` or `HH:MM:SS`.
    fn try_from(s: String) -> Result<Self, Self::Error> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map(Self::new)
            .map_err(|e| format!("invalid time threshold '{}': {} (expected HH:MM or HH:MM:SS)", s, e))
    }
}

impl From<TimeThreshold> for String {
    fn from(t: TimeThreshold) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.time.second() == 0 {
            write!(f, "{}", self.time.format("%H:%M"))
        } else {
            write!(f, "{}", self.time.format("%H:%M:%S"))
        }
    }
}

// ── Duration threshold ───────────────────────────────────────────────

/// Maximum tolerated time between the last modification and the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DurationThreshold {
    pub duration: Duration,
}

impl DurationThreshold {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl TryFrom<String> for DurationThreshold {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        parse_duration(&s)
            .map(Self::new)
            .ok_or_else(|| format!("invalid duration threshold '{}' (expected e.g. 90m, 1h30m, 2d)", s))
    }
}

impl From<DurationThreshold> for String {
    fn from(d: DurationThreshold) -> Self {
        d.to_string()
    }
}

impl fmt::Display for DurationThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(self.duration))
    }
}
