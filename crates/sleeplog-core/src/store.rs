//! The sleep log store.
//!
//! [`SleepLog`] owns the saved entries, the timer and the last-edited marker.
//! Views are plain methods that take "now" explicitly and are recomputed on
//! every call, so elapsed durations never go stale. Actions validate first and
//! only mutate on success; a rejected action returns a [`StoreError`] and
//! leaves the log untouched.
//!
//! # Snapshot format
//!
//! The whole log serializes to one camelCase JSON object:
//!
//! ```json
//! {
//!   "entries": [{"id": "sleep-…", "startTime": "2026-10-18T23:00:00Z",
//!                "endTime": "2026-10-19T06:00:00Z", "durationMinutes": 420}],
//!   "timerStartTime": 1760900000000,
//!   "timerEndTime": null,
//!   "isTimerRunning": true,
//!   "lastEditedEntryId": "sleep-…"
//! }
//! ```

use std::cmp::Ordering;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{SleepEntry, whole_minutes};
use crate::error::StoreError;
use crate::format::{
    format_clock, format_minutes_ago, format_time_input, parse_time_of_day, today_at,
};
use crate::timer::Timer;
use crate::types::EntryId;

/// Shown by [`SleepLog::time_since_last_sleep`] when nothing has been saved.
pub const NO_SLEEP_RECORDED: &str = "No sleep recorded yet";

/// Explicit times for [`SleepLog::save_sleep_entry`].
///
/// A side left as `None` falls back to the timer's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveRequest {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl SaveRequest {
    /// Saves exactly the given range.
    pub const fn range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start_time: Some(start),
            end_time: Some(end),
        }
    }
}

/// Saved sleep entries plus the in-progress timer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepLog {
    /// Entries in insertion order.
    #[serde(default)]
    entries: Vec<SleepEntry>,

    #[serde(flatten)]
    timer: Timer,

    /// Most recently saved or updated entry, used for highlighting.
    #[serde(default)]
    last_edited_entry_id: Option<EntryId>,
}

impl SleepLog {
    /// Creates an empty log with an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a log from its JSON snapshot.
    ///
    /// A timer that claims to be running without a start, or with an end, is
    /// repaired so the running invariant holds.
    pub fn from_snapshot(json: &str) -> Result<Self, serde_json::Error> {
        let mut log: Self = serde_json::from_str(json)?;
        if log.timer.repair() {
            tracing::warn!(timer = ?log.timer, "repaired inconsistent timer from snapshot");
        }
        Ok(log)
    }

    /// Serializes the persisted fields to JSON.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn entries(&self) -> &[SleepEntry] {
        &self.entries
    }

    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    pub const fn last_edited_entry_id(&self) -> Option<&EntryId> {
        self.last_edited_entry_id.as_ref()
    }

    /// Looks up an entry by ID.
    pub fn entry(&self, id: &str) -> Option<&SleepEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    // ========== Views ==========

    /// All entries, newest start first.
    ///
    /// Entries without a start time come last, in insertion order.
    pub fn sorted_entries(&self) -> Vec<&SleepEntry> {
        let mut sorted: Vec<&SleepEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| match (a.start_time, b.start_time) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        sorted
    }

    /// The entry with the latest start time.
    pub fn last_sleep_entry(&self) -> Option<&SleepEntry> {
        self.sorted_entries().into_iter().next()
    }

    /// How long ago the last sleep ended, e.g. `"2h 15m ago"`.
    pub fn time_since_last_sleep(&self, now: DateTime<Utc>) -> String {
        match self.last_sleep_entry().and_then(|entry| entry.end_time) {
            Some(end) => format_minutes_ago(whole_minutes(now - end)),
            None => NO_SLEEP_RECORDED.to_string(),
        }
    }

    /// Whole minutes counted by the timer, or `None` if it has nothing to
    /// measure.
    pub fn current_timer_duration(&self, now: DateTime<Utc>) -> Option<i64> {
        self.timer.elapsed(now).map(whole_minutes)
    }

    /// Timer start as local `HH:MM`.
    pub fn formatted_timer_start_time<Tz: TimeZone>(&self, tz: &Tz) -> Option<String> {
        self.timer
            .start_time()
            .map(|start| format_time_input(Some(start), tz))
    }

    /// Timer end as local `HH:MM`.
    pub fn formatted_timer_end_time<Tz: TimeZone>(&self, tz: &Tz) -> Option<String> {
        self.timer
            .end_time()
            .map(|end| format_time_input(Some(end), tz))
    }

    /// Timer elapsed time as `HH:MM:SS`, `"00:00:00"` when there is nothing
    /// to show.
    pub fn formatted_timer_duration(&self, now: DateTime<Utc>) -> String {
        let seconds = self
            .timer
            .elapsed(now)
            .map_or(-1, |elapsed| elapsed.num_milliseconds().div_euclid(1000));
        format_clock(seconds)
    }

    // ========== Timer actions ==========

    /// Starts the timer at `now`. Returns false if it was already running.
    pub fn start_timer(&mut self, now: DateTime<Utc>) -> bool {
        self.timer.start(now)
    }

    /// Stops the timer at `now`. Returns false if it was not running.
    pub fn stop_timer(&mut self, now: DateTime<Utc>) -> bool {
        self.timer.stop(now)
    }

    /// Resumes a stopped timer from its original start.
    pub fn resume_timer(&mut self) -> bool {
        self.timer.resume()
    }

    /// Returns the timer to idle.
    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    /// Sets the timer start to `time` (`HH:MM`) on the local date of `now`.
    ///
    /// The timer stops; an end before the new start moves up to it.
    pub fn set_manual_start_time<Tz: TimeZone>(
        &mut self,
        time: &str,
        now: &DateTime<Tz>,
    ) -> Result<(), StoreError> {
        let start = parse_time_of_day(time)
            .and_then(|time| today_at(now, time))
            .map_err(|err| rejected("set start time", err))?;
        self.timer.set_start(start);
        Ok(())
    }

    /// Sets the timer end to `time` (`HH:MM`) on the local date of `now`.
    ///
    /// The timer stops; a start after the new end moves back to it.
    pub fn set_manual_end_time<Tz: TimeZone>(
        &mut self,
        time: &str,
        now: &DateTime<Tz>,
    ) -> Result<(), StoreError> {
        let end = parse_time_of_day(time)
            .and_then(|time| today_at(now, time))
            .map_err(|err| rejected("set end time", err))?;
        self.timer.set_end(end);
        Ok(())
    }

    // ========== Entry actions ==========

    /// Saves a new entry from `request`, falling back to the timer for any
    /// side it leaves empty, then resets the timer.
    pub fn save_sleep_entry(
        &mut self,
        request: SaveRequest,
        now: DateTime<Utc>,
    ) -> Result<&SleepEntry, StoreError> {
        let start = request.start_time.or_else(|| self.timer.start_time());
        let end = request.end_time.or_else(|| self.timer.end_time());
        let entry = SleepEntry::new(EntryId::generate(now), start, end)
            .map_err(|err| rejected("save sleep entry", err))?;

        tracing::info!(
            id = %entry.id,
            minutes = entry.duration_minutes,
            "saved sleep entry"
        );
        self.last_edited_entry_id = Some(entry.id.clone());
        self.entries.push(entry);
        self.timer.reset();

        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// Replaces the entry with the same ID, recomputing its duration.
    pub fn update_sleep_entry(&mut self, entry: SleepEntry) -> Result<&SleepEntry, StoreError> {
        let Some(index) = self.entries.iter().position(|e| e.id == entry.id) else {
            return Err(rejected(
                "update sleep entry",
                StoreError::EntryNotFound(entry.id),
            ));
        };
        let updated = SleepEntry::new(entry.id, entry.start_time, entry.end_time)
            .map_err(|err| rejected("update sleep entry", err))?;

        tracing::info!(
            id = %updated.id,
            minutes = updated.duration_minutes,
            "updated sleep entry"
        );
        self.last_edited_entry_id = Some(updated.id.clone());
        self.entries[index] = updated;
        Ok(&self.entries[index])
    }

    /// Removes the entry with the given ID, if any.
    pub fn delete_sleep_entry(&mut self, id: &str) -> Option<SleepEntry> {
        let index = self.entries.iter().position(|entry| entry.id == *id)?;
        let removed = self.entries.remove(index);
        if self.last_edited_entry_id.as_ref() == Some(&removed.id) {
            self.last_edited_entry_id = None;
        }
        tracing::info!(id = %removed.id, "deleted sleep entry");
        Some(removed)
    }
}

fn rejected(action: &'static str, err: StoreError) -> StoreError {
    tracing::warn!(action, error = %err, "rejected");
    err
}
