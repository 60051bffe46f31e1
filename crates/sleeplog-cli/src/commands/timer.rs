//! Timer commands: start, stop, resume, reset and manual start/end edits.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use sleeplog_core::SleepLog;

use super::status;

/// A change to the in-progress timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    Start,
    Stop,
    Resume,
    Reset,
    SetStart(String),
    SetEnd(String),
}

/// Applies `action` and prints the resulting status.
///
/// Returns whether the log changed and needs to be written back.
pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    log: &mut SleepLog,
    action: &TimerAction,
    now: &DateTime<Tz>,
) -> Result<bool> {
    let utc_now = now.with_timezone(&Utc);

    let changed = match action {
        TimerAction::Start => log.start_timer(utc_now),
        TimerAction::Stop => log.stop_timer(utc_now),
        TimerAction::Resume => log.resume_timer(),
        TimerAction::Reset => {
            log.reset_timer();
            true
        }
        TimerAction::SetStart(time) => {
            log.set_manual_start_time(time, now)?;
            true
        }
        TimerAction::SetEnd(time) => {
            log.set_manual_end_time(time, now)?;
            true
        }
    };

    if !changed {
        let note = match action {
            TimerAction::Start => "Timer is already running.",
            TimerAction::Stop => "Timer is not running.",
            _ => "Nothing to resume.",
        };
        writeln!(writer, "{note}")?;
    }

    status::run(writer, log, now, false)?;
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, h, m, 0).unwrap()
    }

    fn apply(log: &mut SleepLog, action: TimerAction, now: DateTime<Utc>) -> (bool, String) {
        let mut output = Vec::new();
        let changed = run(&mut output, log, &action, &now).unwrap();
        (changed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn start_then_start_again() {
        let mut log = SleepLog::new();
        let (changed, _) = apply(&mut log, TimerAction::Start, at(22, 0));
        assert!(changed);

        let (changed, output) = apply(&mut log, TimerAction::Start, at(22, 10));
        assert!(!changed);
        assert_snapshot!(output, @r"
        Timer is already running.
        Timer:      running
        Start:      22:00
        End:        -
        Elapsed:    00:10:00 (10 min)
        Last sleep: No sleep recorded yet
        ");
    }

    #[test]
    fn stop_and_resume() {
        let mut log = SleepLog::new();
        let (changed, output) = apply(&mut log, TimerAction::Stop, at(6, 0));
        assert!(!changed);
        assert!(output.starts_with("Timer is not running.\n"));

        let (changed, output) = apply(&mut log, TimerAction::Resume, at(6, 0));
        assert!(!changed);
        assert!(output.starts_with("Nothing to resume.\n"));

        apply(&mut log, TimerAction::Start, at(0, 0));
        let (changed, _) = apply(&mut log, TimerAction::Stop, at(6, 0));
        assert!(changed);
        let (changed, _) = apply(&mut log, TimerAction::Resume, at(6, 30));
        assert!(changed);
        assert_eq!(log.timer().start_time(), Some(at(0, 0)));
    }

    #[test]
    fn manual_edits_reconcile_order() {
        let mut log = SleepLog::new();
        apply(&mut log, TimerAction::SetEnd("08:00".into()), at(12, 0));
        let (changed, output) = apply(&mut log, TimerAction::SetStart("09:00".into()), at(12, 0));
        assert!(changed);
        assert_snapshot!(output, @r"
        Timer:      stopped
        Start:      09:00
        End:        09:00
        Elapsed:    00:00:00 (0 min)
        Last sleep: No sleep recorded yet
        ");
    }

    #[test]
    fn invalid_manual_time_is_an_error() {
        let mut log = SleepLog::new();
        let mut output = Vec::new();
        let err = run(
            &mut output,
            &mut log,
            &TimerAction::SetStart("7pm".into()),
            &at(12, 0),
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid time of day"));
        assert!(log.timer().is_idle());
    }

    #[test]
    fn reset_clears_timer() {
        let mut log = SleepLog::new();
        apply(&mut log, TimerAction::Start, at(1, 0));
        let (changed, _) = apply(&mut log, TimerAction::Reset, at(2, 0));
        assert!(changed);
        assert!(log.timer().is_idle());
    }
}
