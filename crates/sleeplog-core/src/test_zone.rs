//! A time zone with one daylight-saving period, for tests.
//!
//! Standard time is `+01:00`, summer time `+02:00`. Clocks jump from 02:00 to
//! 03:00 on 2026-03-29 and fall back from 03:00 to 02:00 on 2026-10-25, so
//! local 02:30 does not exist on the first day and happens twice on the
//! second.

use chrono::{
    FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummerTime;

const STANDARD_SECS: i32 = 3600;
const SUMMER_SECS: i32 = 2 * 3600;

fn utc_instant(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, month, day)
        .and_then(|d| d.and_hms_opt(1, 0, 0))
        .unwrap()
}

fn offset(secs: i32) -> FixedOffset {
    FixedOffset::east_opt(secs).unwrap()
}

impl TimeZone for SummerTime {
    type Offset = FixedOffset;

    fn from_offset(_offset: &FixedOffset) -> Self {
        Self
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        // Summer first, so an overlap lists the earlier instant first.
        let fits = |secs: i32| {
            let utc = *local - TimeDelta::seconds(i64::from(secs));
            self.offset_from_utc_datetime(&utc) == offset(secs)
        };
        match (fits(SUMMER_SECS), fits(STANDARD_SECS)) {
            (true, true) => LocalResult::Ambiguous(offset(SUMMER_SECS), offset(STANDARD_SECS)),
            (true, false) => LocalResult::Single(offset(SUMMER_SECS)),
            (false, true) => LocalResult::Single(offset(STANDARD_SECS)),
            (false, false) => LocalResult::None,
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        if (utc_instant(3, 29)..utc_instant(10, 25)).contains(utc) {
            offset(SUMMER_SECS)
        } else {
            offset(STANDARD_SECS)
        }
    }
}
