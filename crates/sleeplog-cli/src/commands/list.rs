//! List command for saved sleep entries.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use sleeplog_core::{NO_SLEEP_RECORDED, SleepLog, format_datetime_input};

use super::util::format_duration_minutes;

/// Runs the list command, newest entry first.
///
/// The most recently saved or edited entry is marked.
pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    log: &SleepLog,
    tz: &Tz,
    json: bool,
) -> Result<()> {
    let entries = log.sorted_entries();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(writer, "{NO_SLEEP_RECORDED}")?;
        return Ok(());
    }

    let last_edited = log.last_edited_entry_id();
    for entry in entries {
        let start = or_dash(format_datetime_input(entry.start_time, tz));
        let end = or_dash(format_datetime_input(entry.end_time, tz));
        write!(
            writer,
            "{}  {start} -> {end}  {}",
            entry.id,
            format_duration_minutes(entry.duration_minutes)
        )?;
        if last_edited == Some(&entry.id) {
            write!(writer, "  (last edited)")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn or_dash(s: String) -> String {
    if s.is_empty() { "-".to_string() } else { s }
}
