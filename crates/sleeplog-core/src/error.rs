//! Errors returned by store actions.
//!
//! Every variant is a rejected input. A rejected action leaves the store
//! exactly as it was before the call.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::types::EntryId;

/// A store action was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Start or end time was not available.
    #[error("invalid start or end time: both must be set")]
    MissingTime,

    /// End time precedes start time.
    #[error("end time {end} is before start time {start}")]
    InvertedRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The range rounds down to zero whole minutes.
    #[error("sleep duration must be positive, got {minutes} min")]
    NonPositiveDuration { minutes: i64 },

    /// No entry with the given ID exists.
    #[error("no sleep entry with id {0}")]
    EntryNotFound(EntryId),

    /// A wall-clock value was not a valid `HH:MM` time.
    #[error("invalid time of day {input:?}, expected HH:MM")]
    InvalidTimeOfDay { input: String },

    /// A date-time input value was not a valid `YYYY-MM-DDTHH:MM` string.
    #[error("invalid date-time {input:?}, expected YYYY-MM-DDTHH:MM")]
    InvalidDateTime { input: String },

    /// The local time falls in a daylight-saving gap.
    #[error("local time {0} does not exist in this time zone")]
    NonexistentLocalTime(NaiveDateTime),
}
