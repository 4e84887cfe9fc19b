//! Human-readable durations in `1h30m0s` notation.
//!
//! Parsing accepts the unit suffixes `ns`, `us`/`µs`, `ms`, `s`, `m`, `h` and `d`,
//! decimal fractions (`1.5h`) and combined components (`1h30m`).
//! Formatting produces the compact `XhYmZs` form used in stale-table reasons.

use chrono::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a duration string such as `90m`, `1h30m`, `1.5h` or `2d`.
///
/// A leading `-` or `+` sign is allowed. A bare `0` is zero; any other
/// number needs a unit. Returns `None` if the string is empty, malformed,
/// or out of range.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (negative, mut rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if rest == "0" {
        return Some(Duration::zero());
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(num_end);
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        rest = tail;

        let scale: i128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            "d" => 86_400 * 1_000_000_000,
            _ => return None,
        };
        total = total.checked_add(scaled(number, scale)?)?;
    }

    let nanos = i64::try_from(if negative { -total } else { total }).ok()?;
    Some(Duration::nanoseconds(nanos))
}

/// `number` (optionally with a decimal fraction) multiplied by `scale` nanoseconds.
fn scaled(number: &str, scale: i128) -> Option<i128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut value = whole.checked_mul(scale)?;

    // Digits beyond nanosecond resolution of the largest unit cannot matter.
    let frac = &frac[..frac.len().min(18)];
    if !frac.is_empty() {
        let numerator: i128 = frac.parse().ok()?;
        let denominator = 10i128.pow(frac.len() as u32);
        value = value.checked_add(numerator * scale / denominator)?;
    }
    Some(value)
}

/// Render a duration as `1h30m0s`, `45m0s`, `1.5s`, `250ms` or `0s`.
///
/// Durations of a second or more use hours, minutes and (fractional) seconds,
/// omitting leading zero units. Shorter ones use the largest of `ms`, `µs`
/// or `ns` that keeps the value at or above one.
pub fn format_duration(d: Duration) -> String {
    let nanos: i128 = match d.num_nanoseconds() {
        Some(n) => i128::from(n),
        None => i128::from(d.num_milliseconds()) * 1_000_000,
    };
    if nanos == 0 {
        return "0s".to_string();
    }

    let sign = if nanos < 0 { "-" } else { "" };
    let u = nanos.unsigned_abs();

    if u < NANOS_PER_SEC {
        return if u < 1_000 {
            format!("{sign}{u}ns")
        } else if u < 1_000_000 {
            format!("{sign}{}µs", with_fraction(u, 1_000))
        } else {
            format!("{sign}{}ms", with_fraction(u, 1_000_000))
        };
    }

    let total_secs = u / NANOS_PER_SEC;
    let hours = total_secs / 3_600;
    let minutes = (total_secs / 60) % 60;
    let seconds = with_fraction((total_secs % 60) * NANOS_PER_SEC + u % NANOS_PER_SEC, NANOS_PER_SEC);

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}

/// `value / scale` with the remainder as a decimal fraction, trailing zeros trimmed.
fn with_fraction(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{:0width$}", frac, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
