//! Conversions between timestamps and the strings shown to or typed by users.
//!
//! All timestamps are stored in UTC. Display and input happen in a caller
//! supplied time zone, usually [`chrono::Local`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::StoreError;

const TIME_INPUT_FORMAT: &str = "%H:%M";
const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Formats a timestamp as a local `HH:MM` time of day.
///
/// Returns an empty string when there is no timestamp.
pub fn format_time_input<Tz: TimeZone>(ts: Option<DateTime<Utc>>, tz: &Tz) -> String {
    ts.map_or_else(String::new, |ts| {
        ts.with_timezone(tz)
            .naive_local()
            .format(TIME_INPUT_FORMAT)
            .to_string()
    })
}

/// Formats a timestamp as a local `YYYY-MM-DDTHH:MM` date-time.
///
/// Returns an empty string when there is no timestamp.
pub fn format_datetime_input<Tz: TimeZone>(ts: Option<DateTime<Utc>>, tz: &Tz) -> String {
    ts.map_or_else(String::new, |ts| {
        ts.with_timezone(tz)
            .naive_local()
            .format(DATETIME_INPUT_FORMAT)
            .to_string()
    })
}

/// Parses a `YYYY-MM-DDTHH:MM` value as local time in `tz`.
pub fn parse_datetime_input<Tz: TimeZone>(
    s: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>, StoreError> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), DATETIME_INPUT_FORMAT).map_err(|_| {
        StoreError::InvalidDateTime {
            input: s.to_string(),
        }
    })?;
    resolve_local(tz, naive)
}

/// Parses a wall-clock `HH:MM` value.
///
/// A trailing `:SS` part is accepted and ignored, the result always has zero
/// seconds.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, StoreError> {
    let invalid = || StoreError::InvalidTimeOfDay {
        input: s.to_string(),
    };

    let mut parts = s.trim().split(':');
    let (Some(hours), Some(minutes)) = (parts.next(), parts.next()) else {
        return Err(invalid());
    };
    if let Some(seconds) = parts.next() {
        let valid = seconds.len() == 2
            && is_digits(seconds)
            && seconds.parse::<u32>().is_ok_and(|s| s <= 59);
        if !valid {
            return Err(invalid());
        }
    }
    if parts.next().is_some() || hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    if !is_digits(hours) || !is_digits(minutes) {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the instant at which the local clock in `now`'s zone shows `time`
/// on the same calendar day as `now`.
pub fn today_at<Tz: TimeZone>(
    now: &DateTime<Tz>,
    time: NaiveTime,
) -> Result<DateTime<Utc>, StoreError> {
    let date: NaiveDate = now.date_naive();
    resolve_local(&now.timezone(), date.and_time(time))
}

/// Maps a local wall-clock value to UTC, taking the earlier instant when the
/// value is ambiguous.
fn resolve_local<Tz: TimeZone>(
    tz: &Tz,
    naive: NaiveDateTime,
) -> Result<DateTime<Utc>, StoreError> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(StoreError::NonexistentLocalTime(naive))
}

/// Formats whole seconds as zero-padded `HH:MM:SS`.
///
/// Negative values render as `00:00:00`. Hours are not wrapped at 24.
pub fn format_clock(total_seconds: i64) -> String {
    if total_seconds < 0 {
        return "00:00:00".to_string();
    }
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Describes how long ago something ended, given whole minutes.
pub fn format_minutes_ago(minutes: i64) -> String {
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }
    format!("{}h {}m ago", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;
    use crate::test_zone::SummerTime;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, h, m, 0).unwrap()
    }

    #[test]
    fn time_input_uses_target_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_time_input(Some(utc(22, 5)), &tz), "00:05");
        assert_eq!(format_time_input(Some(utc(22, 5)), &Utc), "22:05");
    }

    #[test]
    fn datetime_input_uses_target_zone() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            format_datetime_input(Some(utc(3, 30)), &tz),
            "2026-10-18T22:30"
        );
    }

    #[test]
    fn input_helpers_return_empty_for_none() {
        assert_eq!(format_time_input(None, &Utc), "");
        assert_eq!(format_datetime_input(None, &Utc), "");
    }

    #[test]
    fn datetime_input_parses_back() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let ts = utc(6, 45);
        let text = format_datetime_input(Some(ts), &tz);
        assert_eq!(parse_datetime_input(&text, &tz).unwrap(), ts);
        assert!(parse_datetime_input("yesterday", &tz).is_err());
    }

    #[test]
    fn parse_time_of_day_accepts_valid_values() {
        assert_eq!(
            parse_time_of_day("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day("7:05").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day("23:59:30").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
    }

    #[test]
    fn parse_time_of_day_rejects_garbage() {
        for input in [
            "", "9", "24:00", "12:60", "ab:cd", "12:5", "1:2:3:4", "-1:30", "+1:30", "12:+5",
            "+9:+9", "12:00:+5",
        ] {
            assert!(
                matches!(
                    parse_time_of_day(input),
                    Err(StoreError::InvalidTimeOfDay { .. })
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn today_at_keeps_local_date() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        // 2026-10-19 20:00 UTC is already 2026-10-20 in +09:00.
        let now = utc(20, 0).with_timezone(&tz);
        let time = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        assert_eq!(
            today_at(&now, time).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 19, 21, 0, 0).unwrap()
        );
    }

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(3 * 3600 + 7 * 60 + 9), "03:07:09");
        assert_eq!(format_clock(26 * 3600), "26:00:00");
        assert_eq!(format_clock(-5), "00:00:00");
    }

    #[test]
    fn minutes_ago_buckets() {
        assert_eq!(format_minutes_ago(-3), "Just now");
        assert_eq!(format_minutes_ago(0), "Just now");
        assert_eq!(format_minutes_ago(1), "1 min ago");
        assert_eq!(format_minutes_ago(59), "59 min ago");
        assert_eq!(format_minutes_ago(60), "1h 0m ago");
        assert_eq!(format_minutes_ago(135), "2h 15m ago");
    }

    #[test]
    fn local_time_in_gap_is_rejected() {
        let naive = NaiveDate::from_ymd_opt(2026, 3, 29)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let now = SummerTime.from_utc_datetime(&naive);
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();

        assert_eq!(
            today_at(&now, time),
            Err(StoreError::NonexistentLocalTime(naive))
        );
        assert_eq!(
            parse_datetime_input("2026-03-29T02:30", &SummerTime),
            Err(StoreError::NonexistentLocalTime(naive))
        );
    }

    #[test]
    fn ambiguous_local_time_takes_earlier_instant() {
        let noon = Utc.with_ymd_and_hms(2026, 10, 25, 12, 0, 0).unwrap();
        let now = noon.with_timezone(&SummerTime);
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2026, 10, 25, 0, 30, 0).unwrap();

        assert_eq!(today_at(&now, time).unwrap(), earlier);
        assert_eq!(
            parse_datetime_input("2026-10-25T02:30", &SummerTime).unwrap(),
            earlier
        );
    }
}
