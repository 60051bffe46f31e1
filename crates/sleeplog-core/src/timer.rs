//! The single in-progress sleep timer.
//!
//! A timer is idle (no timestamps), running (start set, no end) or stopped
//! (start and end set, not yet saved). Elapsed time is never tracked in the
//! background; it is computed from a caller supplied "now" whenever asked.

use chrono::serde::ts_milliseconds_option;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Timer state persisted alongside the sleep log.
///
/// Invariant: when `running` is true, `start_time` is set and `end_time` is
/// not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// When the timer was started, in epoch milliseconds on disk.
    #[serde(rename = "timerStartTime", default, with = "ts_milliseconds_option")]
    start_time: Option<DateTime<Utc>>,

    /// When the timer was stopped, in epoch milliseconds on disk.
    #[serde(rename = "timerEndTime", default, with = "ts_milliseconds_option")]
    end_time: Option<DateTime<Utc>>,

    #[serde(rename = "isTimerRunning", default)]
    running: bool,
}

impl Timer {
    pub const fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the timer has no timestamps at all.
    pub const fn is_idle(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none() && !self.running
    }

    /// Starts counting from `now`. No-op if already running.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.running {
            return false;
        }
        self.start_time = Some(now);
        self.end_time = None;
        self.running = true;
        true
    }

    /// Stops at `now`, keeping the start so the interval can still be edited
    /// or resumed. No-op if not running.
    pub fn stop(&mut self, now: DateTime<Utc>) -> bool {
        if !self.running {
            return false;
        }
        self.end_time = Some(now);
        self.running = false;
        true
    }

    /// Continues counting from the original start, so paused time is
    /// included. No-op if running or never started.
    pub fn resume(&mut self) -> bool {
        if self.running || self.start_time.is_none() {
            return false;
        }
        self.end_time = None;
        self.running = true;
        true
    }

    /// Clears both timestamps and stops.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sets the start explicitly and stops the timer. An end earlier than the
    /// new start is moved up to it.
    pub fn set_start(&mut self, start: DateTime<Utc>) {
        self.start_time = Some(start);
        if self.end_time.is_some_and(|end| end < start) {
            self.end_time = Some(start);
        }
        self.running = false;
    }

    /// Sets the end explicitly and stops the timer. A start later than the new
    /// end is moved back to it.
    pub fn set_end(&mut self, end: DateTime<Utc>) {
        self.end_time = Some(end);
        if self.start_time.is_some_and(|start| start > end) {
            self.start_time = Some(end);
        }
        self.running = false;
    }

    /// Time counted so far.
    ///
    /// Running: `now - start`. Stopped with both timestamps: `end - start`.
    /// Otherwise `None`.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        match (self.running, self.start_time, self.end_time) {
            (true, Some(start), _) => Some(now - start),
            (false, Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Restores the running invariant on state read from disk.
    ///
    /// Returns true if anything had to change.
    pub(crate) fn repair(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if self.start_time.is_none() {
            self.running = false;
            self.end_time = None;
            return true;
        }
        if self.end_time.is_some() {
            self.end_time = None;
            return true;
        }
        false
    }
}
