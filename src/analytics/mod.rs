//! Spending analytics over read-only snapshots of expense records.
//!
//! Every function here is pure: the caller supplies the expense slice and the
//! current moment (`now`), whose time zone defines "local" calendar days and
//! months. Nothing is cached; views are recomputed on every call.

mod aggregate;
mod breakdown;
mod budget;
mod filter;

pub(crate) use aggregate::{
    daily_average, month_over_month_trend, projected_monthly_total, today_total, total,
};
pub(crate) use breakdown::{category_breakdown, BreakdownOrder};
pub(crate) use budget::BudgetStatus;
pub(crate) use filter::{ExpenseFilter, TimeWindow};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

pub(crate) const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Convert an epoch-millisecond timestamp into the time zone of `tz`.
/// Out-of-range timestamps yield `None` and never match a calendar predicate.
pub(crate) fn to_local<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.timestamp_millis_opt(timestamp).single()
}

/// Local calendar date of a timestamp.
pub(crate) fn local_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<NaiveDate> {
    to_local(timestamp, tz).map(|dt| dt.date_naive())
}

pub(crate) fn is_same_day<Tz: TimeZone>(timestamp: i64, now: &DateTime<Tz>) -> bool {
    local_date(timestamp, &now.timezone()) == Some(now.date_naive())
}

pub(crate) fn is_in_month<Tz: TimeZone>(timestamp: i64, tz: &Tz, year: i32, month: u32) -> bool {
    local_date(timestamp, tz).is_some_and(|d| d.year() == year && d.month() == month)
}

pub(crate) fn is_same_month<Tz: TimeZone>(timestamp: i64, now: &DateTime<Tz>) -> bool {
    is_in_month(timestamp, &now.timezone(), now.year(), now.month())
}

/// The calendar month before (`year`, `month`), rolling January back a year.
pub(crate) fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Number of days in the given calendar month (28–31).
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 30,
    }
}
