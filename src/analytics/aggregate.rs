use std::collections::HashSet;

use chrono::{DateTime, Datelike, TimeZone};
use rust_decimal::Decimal;

use super::{days_in_month, is_in_month, is_same_day, local_date, previous_month};
use crate::models::Expense;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Sum of amounts, saturating at `Decimal::MAX` / `Decimal::MIN`.
pub(crate) fn total<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Decimal {
    expenses
        .into_iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount))
}

/// Sum of amounts divided by the number of distinct local calendar days
/// present in the list (at least one). Empty list → 0.
pub(crate) fn daily_average<Tz: TimeZone>(expenses: &[Expense], tz: &Tz) -> Decimal {
    if expenses.is_empty() {
        return Decimal::ZERO;
    }
    let days: HashSet<_> = expenses
        .iter()
        .filter_map(|e| local_date(e.timestamp, tz))
        .collect();
    let days = days.len().max(1);
    total(expenses)
        .checked_div(Decimal::from(days))
        .unwrap_or(Decimal::ZERO)
}

/// Extrapolates the list total to a full month: `(sum / day_of_month) *
/// days_in_month`, both taken from `now` regardless of what dates the list
/// covers.
pub(crate) fn projected_monthly_total<Tz: TimeZone>(expenses: &[Expense], now: &DateTime<Tz>) -> Decimal {
    let current_day = now.day();
    if current_day == 0 {
        return Decimal::ZERO;
    }
    let month_len = days_in_month(now.year(), now.month());
    total(expenses)
        .checked_div(Decimal::from(current_day))
        .map_or(Decimal::ZERO, |per_day| per_day.saturating_mul(Decimal::from(month_len)))
}

/// Percentage change between the current and previous calendar month totals
/// of the same list, saturating at the `Decimal` range.
///
/// A previous month with no spending yields exactly 0, even when the current
/// month has spending; "no change" and "infinite increase" are conflated.
pub(crate) fn month_over_month_trend<Tz: TimeZone>(expenses: &[Expense], now: &DateTime<Tz>) -> Decimal {
    let tz = now.timezone();
    let (year, month) = (now.year(), now.month());
    let (last_year, last_month) = previous_month(year, month);

    let current_total = total(
        expenses
            .iter()
            .filter(|e| is_in_month(e.timestamp, &tz, year, month)),
    );
    let last_total = total(
        expenses
            .iter()
            .filter(|e| is_in_month(e.timestamp, &tz, last_year, last_month)),
    );

    if last_total.is_zero() {
        return Decimal::ZERO;
    }
    let change = current_total.saturating_sub(last_total);
    match change
        .checked_div(last_total)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
    {
        Some(trend) => trend,
        None if change.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

/// Total spent on the local calendar day of `now`.
pub(crate) fn today_total<Tz: TimeZone>(expenses: &[Expense], now: &DateTime<Tz>) -> Decimal {
    total(expenses.iter().filter(|e| is_same_day(e.timestamp, now)))
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
