//! Saved sleep sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::StoreError;
use crate::types::EntryId;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// A completed sleep session.
///
/// Timestamps are optional only so that snapshots written by older versions
/// still load. Entries accepted by the store always have both set, with
/// `end_time >= start_time` and a positive `duration_minutes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    pub id: EntryId,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Whole minutes between start and end, recomputed on every save.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub duration_minutes: i64,
}

/// Older snapshots may hold `null` for the duration.
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

impl SleepEntry {
    /// Builds an entry from a validated range.
    pub fn new(
        id: EntryId,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, StoreError> {
        let (start, end, minutes) = validate_range(start, end)?;
        Ok(Self {
            id,
            start_time: Some(start),
            end_time: Some(end),
            duration_minutes: minutes,
        })
    }
}

/// Checks that both ends are present, ordered, and at least a minute apart.
///
/// Returns the range with its duration in whole minutes, rounded down.
pub fn validate_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(DateTime<Utc>, DateTime<Utc>, i64), StoreError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(StoreError::MissingTime);
    };
    if end < start {
        return Err(StoreError::InvertedRange { start, end });
    }
    let minutes = whole_minutes(end - start);
    if minutes <= 0 {
        return Err(StoreError::NonPositiveDuration { minutes });
    }
    Ok((start, end, minutes))
}

/// Floors a duration to whole minutes, rounding toward negative infinity.
pub(crate) fn whole_minutes(delta: chrono::TimeDelta) -> i64 {
    delta.num_milliseconds().div_euclid(MILLIS_PER_MINUTE)
}
