//! Entry commands: save, edit and delete.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use sleeplog_core::{SaveRequest, SleepEntry, SleepLog, format_datetime_input};

use super::util::{format_duration_minutes, parse_optional};

/// Saves the timer, or an explicit range, as a new entry.
///
/// Either side left out falls back to the timer.
pub fn save<W: Write, Tz: TimeZone>(
    writer: &mut W,
    log: &mut SleepLog,
    start: Option<&str>,
    end: Option<&str>,
    now: &DateTime<Tz>,
) -> Result<bool> {
    let request = SaveRequest {
        start_time: parse_optional(start, "start", now)?,
        end_time: parse_optional(end, "end", now)?,
    };
    let entry = log
        .save_sleep_entry(request, now.with_timezone(&Utc))
        .context("failed to save sleep entry")?;

    writeln!(writer, "Saved {}", describe(entry, &now.timezone()))?;
    Ok(true)
}

/// Changes the start and/or end of an existing entry.
pub fn edit<W: Write, Tz: TimeZone>(
    writer: &mut W,
    log: &mut SleepLog,
    id: &str,
    start: Option<&str>,
    end: Option<&str>,
    now: &DateTime<Tz>,
) -> Result<bool> {
    let existing = log
        .entry(id)
        .with_context(|| format!("no sleep entry with id {id}"))?;
    let edited = SleepEntry {
        start_time: parse_optional(start, "start", now)?.or(existing.start_time),
        end_time: parse_optional(end, "end", now)?.or(existing.end_time),
        ..existing.clone()
    };
    let entry = log
        .update_sleep_entry(edited)
        .context("failed to update sleep entry")?;

    writeln!(writer, "Updated {}", describe(entry, &now.timezone()))?;
    Ok(true)
}

/// Deletes an entry. Unknown IDs are not an error.
pub fn delete<W: Write>(writer: &mut W, log: &mut SleepLog, id: &str) -> Result<bool> {
    match log.delete_sleep_entry(id) {
        Some(entry) => {
            writeln!(writer, "Deleted {}", entry.id)?;
            Ok(true)
        }
        None => {
            writeln!(writer, "No sleep entry with id {id}.")?;
            Ok(false)
        }
    }
}

fn describe<Tz: TimeZone>(entry: &SleepEntry, tz: &Tz) -> String {
    format!(
        "{}: {} -> {} ({})",
        entry.id,
        format_datetime_input(entry.start_time, tz),
        format_datetime_input(entry.end_time, tz),
        format_duration_minutes(entry.duration_minutes)
    )
}
