//! Status command showing the timer and time since last sleep.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use sleeplog_core::{SleepEntry, SleepLog};

/// What the timer is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Stopped,
}

impl TimerState {
    fn of(log: &SleepLog) -> Self {
        let timer = log.timer();
        if timer.is_running() {
            Self::Running
        } else if timer.is_idle() {
            Self::Idle
        } else {
            Self::Stopped
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

/// Everything the status view shows, as emitted by `--json`.
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    timer: TimerState,
    start_time: Option<String>,
    end_time: Option<String>,
    elapsed: String,
    elapsed_minutes: Option<i64>,
    time_since_last_sleep: String,
    last_sleep: Option<&'a SleepEntry>,
}

impl<'a> StatusReport<'a> {
    fn new<Tz: TimeZone>(log: &'a SleepLog, now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let now = now.with_timezone(&Utc);
        Self {
            timer: TimerState::of(log),
            start_time: log.formatted_timer_start_time(&tz),
            end_time: log.formatted_timer_end_time(&tz),
            elapsed: log.formatted_timer_duration(now),
            elapsed_minutes: log.current_timer_duration(now),
            time_since_last_sleep: log.time_since_last_sleep(now),
            last_sleep: log.last_sleep_entry(),
        }
    }
}

/// Runs the status command.
pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    log: &SleepLog,
    now: &DateTime<Tz>,
    json: bool,
) -> Result<()> {
    let report = StatusReport::new(log, now);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(writer, "Timer:      {}", report.timer.as_str())?;
    writeln!(
        writer,
        "Start:      {}",
        report.start_time.as_deref().unwrap_or("-")
    )?;
    writeln!(
        writer,
        "End:        {}",
        report.end_time.as_deref().unwrap_or("-")
    )?;
    match report.elapsed_minutes {
        Some(minutes) => writeln!(writer, "Elapsed:    {} ({minutes} min)", report.elapsed)?,
        None => writeln!(writer, "Elapsed:    {}", report.elapsed)?,
    }
    writeln!(writer, "Last sleep: {}", report.time_since_last_sleep)?;

    Ok(())
}
