use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone};
use daybook_store_core::Record;

use crate::errors::{CoreError, CoreResult};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Calendar-day key (`YYYY-MM-DD`) of a unix timestamp in the given zone.
pub fn key_of<Tz: TimeZone>(timestamp: u64, tz: &Tz) -> String {
    let dt = DateTime::from_timestamp(timestamp as i64, 0).expect("timestamp out of range");
    dt.with_timezone(tz)
        .date_naive()
        .format(DAY_KEY_FORMAT)
        .to_string()
}

/// Half-open `[start, end)` unix-second interval covering the calendar day
/// in the given zone. The end bound is the next local midnight, which equals
/// start+86400 except across DST shifts.
pub fn bounds_of<Tz: TimeZone>(day_key: &str, tz: &Tz) -> CoreResult<(u64, u64)> {
    let date = parse_day_key(day_key)?;
    let start = local_midnight(date, tz, day_key)?;
    let end = local_midnight(date + Duration::days(1), tz, day_key)?;
    Ok((start, end))
}

fn parse_day_key(day_key: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(day_key, DAY_KEY_FORMAT)
        .map_err(|_| CoreError::InvalidDayKey(day_key.to_owned()))
}

fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz, day_key: &str) -> CoreResult<u64> {
    // `earliest` resolves the ambiguous case of a DST fold; a zone where
    // midnight doesn't exist at all yields an error.
    date.and_time(NaiveTime::MIN)
        .and_local_timezone(tz.clone())
        .earliest()
        .map(|dt| dt.timestamp() as u64)
        .ok_or_else(|| CoreError::InvalidDayKey(day_key.to_owned()))
}

/// Display label of a day key relative to a reference date.
pub fn label_of(day_key: &str, today: NaiveDate) -> String {
    let Ok(date) = parse_day_key(day_key) else {
        return day_key.to_owned();
    };

    if date == today {
        "Today".to_owned()
    } else if date + Duration::days(1) == today {
        "Yesterday".to_owned()
    } else if date.year() == today.year() {
        date.format("%B %-d").to_string()
    } else {
        date.format("%Y %B %-d").to_string()
    }
}

pub fn title_line_of(day_key: &str) -> String {
    format!("# {day_key}")
}

/// Content-sniffing container check: a record is the day's container when
/// its content opens with the day's title line. Kept behind this single
/// function so a structural marker can replace it without touching callers.
pub fn is_container_for(record: &Record, day_key: &str) -> bool {
    record.content.trim().starts_with(&title_line_of(day_key))
}
