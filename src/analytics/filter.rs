use chrono::{DateTime, TimeZone};

use super::{is_same_day, is_same_month, MILLIS_PER_DAY};
use crate::models::Expense;

/// Time window governing which expenses are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeWindow {
    /// Same local calendar day as now.
    Today,
    /// Rolling seven days ending now, not a calendar week.
    ThisWeek,
    /// Same local calendar month and year as now.
    ThisMonth,
    /// Inclusive `[start, end]` in epoch milliseconds.
    Range { start: i64, end: i64 },
}

impl TimeWindow {
    pub(crate) fn contains<Tz: TimeZone>(&self, timestamp: i64, now: &DateTime<Tz>) -> bool {
        match *self {
            Self::Today => is_same_day(timestamp, now),
            Self::ThisWeek => timestamp >= now.timestamp_millis() - 7 * MILLIS_PER_DAY,
            Self::ThisMonth => is_same_month(timestamp, now),
            Self::Range { start, end } => (start..=end).contains(&timestamp),
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::ThisWeek => "This Week",
            Self::ThisMonth => "This Month",
            Self::Range { .. } => "Range",
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The caller-owned filter selection. An empty search and an unset window or
/// category are inactive predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ExpenseFilter {
    pub(crate) window: Option<TimeWindow>,
    pub(crate) search: String,
    pub(crate) category: Option<String>,
}

impl ExpenseFilter {
    pub(crate) fn new(window: Option<TimeWindow>) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub(crate) fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub(crate) fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub(crate) fn is_active(&self) -> bool {
        self.window.is_some() || !self.search.is_empty() || self.category.is_some()
    }

    pub(crate) fn matches<Tz: TimeZone>(&self, expense: &Expense, now: &DateTime<Tz>) -> bool {
        if let Some(window) = &self.window {
            if !window.contains(expense.timestamp, now) {
                return false;
            }
        }
        if !expense.matches_search(&self.search) {
            return false;
        }
        match &self.category {
            Some(cat) => expense.category == *cat,
            None => true,
        }
    }

    /// The subsequence of `expenses` satisfying every active predicate, in
    /// input order.
    pub(crate) fn apply<Tz: TimeZone>(&self, expenses: &[Expense], now: &DateTime<Tz>) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| self.matches(e, now))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
