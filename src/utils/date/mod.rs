// Date utility functions
// Day-granularity arithmetic for timeline placement

use chrono::{Days, NaiveDate, NaiveDateTime};

pub fn is_same_day(date1: NaiveDateTime, date2: NaiveDateTime) -> bool {
    date1.date() == date2.date()
}

/// Whole calendar days from `from` to `to` (negative if `to` is earlier).
/// Time-of-day is ignored.
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to.date() - from.date()).num_days()
}

/// Shift a timestamp by whole days, keeping its time-of-day.
/// Returns `None` when the result falls outside chrono's representable range.
pub fn shift_days(date: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    shift_date(date.date(), days).map(|day| on_day(day, date))
}

/// Day `days` away from `day`, or `None` when out of range.
pub fn shift_date(day: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        day.checked_add_days(magnitude)
    } else {
        day.checked_sub_days(magnitude)
    }
}

/// Place `date`'s time-of-day on another calendar day.
pub fn on_day(day: NaiveDate, date: NaiveDateTime) -> NaiveDateTime {
    day.and_time(date.time())
}
