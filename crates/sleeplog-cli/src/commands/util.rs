//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, TimeZone, Utc};
use regex::Regex;
use sleeplog_core::format::parse_datetime_input;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Parse a datetime string as ISO 8601, local date-time input, or relative time.
///
/// Supports:
/// - ISO 8601: "2026-10-19T06:30:00Z"
/// - Local date-time input: "2026-10-19T06:30"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime<Tz: TimeZone>(s: &str, now: &DateTime<Tz>) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = parse_datetime_input(s, &now.timezone()) {
        return Ok(dt);
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use ISO 8601 (e.g., 2026-10-19T06:30:00Z), YYYY-MM-DDTHH:MM, or relative (e.g., '8 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    let duration = Duration::minutes(n * minutes_per_unit);
    Ok(now.with_timezone(&Utc) - duration)
}

/// Parse an optional `--start`/`--end` argument.
pub fn parse_optional<Tz: TimeZone>(
    s: Option<&str>,
    name: &str,
    now: &DateTime<Tz>,
) -> anyhow::Result<Option<DateTime<Utc>>> {
    s.map(|s| parse_datetime(s, now).with_context(|| format!("invalid --{name} value")))
        .transpose()
}

/// Formats whole minutes as `7h 05m`.
pub fn format_duration_minutes(minutes: i64) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}
