//! Local-calendar helpers shared by the view filter and the report
//! generator.
//!
//! # Responsibility
//! - Map epoch-millisecond instants to local calendar days and weeks.
//! - Resolve local wall-clock datetimes across DST gaps without panicking.
//!
//! # Invariants
//! - Day and week ranges span 00:00:00.000 through 23:59:59.999 inclusive.
//! - Weeks run Monday through Sunday (ISO convention).
//! - All functions are total: pathological calendar input yields `None`,
//!   never a panic.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

pub const SECOND_MS: i64 = 1_000;
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;

/// Inclusive epoch-millisecond interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeRange {
    /// Interval-overlap check: `[start, end]` touches this range.
    pub fn overlaps(&self, start_ms: i64, end_ms: i64) -> bool {
        start_ms <= self.end_ms && end_ms >= self.start_ms
    }
}

/// Converts an epoch-millisecond instant to a zoned datetime.
pub fn local_datetime<Tz: TimeZone>(tz: &Tz, epoch_ms: i64) -> Option<DateTime<Tz>> {
    match tz.timestamp_millis_opt(epoch_ms) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => None,
    }
}

/// Resolves a local wall-clock datetime in `tz`.
///
/// Ambiguous datetimes (DST fall-back) take the earlier instant; datetimes
/// inside a DST gap are shifted forward one hour.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => match tz.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earlier, _) => Some(earlier),
            LocalResult::None => None,
        },
    }
}

/// Epoch milliseconds of `date` at `minute_of_day` in `tz`.
///
/// Minutes at or past 24:00 roll into the following day, so a work window
/// ending at midnight stays expressible.
pub fn at_minute_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate, minute_of_day: u32) -> Option<i64> {
    let mut date = date;
    let mut minute = minute_of_day;
    while minute >= 24 * 60 {
        date = date.succ_opt()?;
        minute -= 24 * 60;
    }
    let naive = date.and_hms_opt(minute / 60, minute % 60, 0)?;
    Some(resolve_local(tz, naive)?.timestamp_millis())
}

/// The local calendar day containing `at_ms`, as a millisecond range
/// `[00:00:00.000, 23:59:59.999]`.
pub fn day_bounds<Tz: TimeZone>(tz: &Tz, at_ms: i64) -> Option<TimeRange> {
    let date = local_datetime(tz, at_ms)?.date_naive();
    range_for_dates(tz, date, date)
}

/// The local Monday-through-Sunday week containing `at_ms`.
pub fn week_bounds<Tz: TimeZone>(tz: &Tz, at_ms: i64) -> Option<TimeRange> {
    let date = local_datetime(tz, at_ms)?.date_naive();
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    let sunday = monday + Duration::days(6);
    range_for_dates(tz, monday, sunday)
}

fn range_for_dates<Tz: TimeZone>(tz: &Tz, first: NaiveDate, last: NaiveDate) -> Option<TimeRange> {
    let start = resolve_local(tz, first.and_hms_milli_opt(0, 0, 0, 0)?)?;
    let end = resolve_local(tz, last.and_hms_milli_opt(23, 59, 59, 999)?)?;
    Some(TimeRange {
        start_ms: start.timestamp_millis(),
        end_ms: end.timestamp_millis(),
    })
}
