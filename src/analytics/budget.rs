use rust_decimal::Decimal;

use super::TimeWindow;
use crate::models::BudgetLimits;

/// Spending total compared against the limit matching the active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BudgetStatus {
    pub(crate) spent: Decimal,
    pub(crate) limit: Decimal,
    pub(crate) over_budget: bool,
    /// `spent / limit`, capped at 1.
    pub(crate) progress: Decimal,
}

impl BudgetStatus {
    /// The weekly limit applies to `ThisWeek`, the monthly limit to anything
    /// else. Only week and month windows can be over budget.
    pub(crate) fn evaluate(spent: Decimal, window: Option<TimeWindow>, limits: &BudgetLimits) -> Self {
        let limit = match window {
            Some(TimeWindow::ThisWeek) => limits.weekly,
            _ => limits.monthly,
        };
        let over_budget = matches!(window, Some(TimeWindow::ThisWeek | TimeWindow::ThisMonth))
            && spent > limit;
        let progress = if limit > Decimal::ZERO {
            spent.checked_div(limit).unwrap_or(Decimal::ONE).min(Decimal::ONE)
        } else {
            Decimal::ZERO
        };
        Self {
            spent,
            limit,
            over_budget,
            progress,
        }
    }

    pub(crate) fn remaining(&self) -> Decimal {
        self.limit.saturating_sub(self.spent)
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod tests;
