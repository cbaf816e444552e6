use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::Expense;

/// Output ordering of a category breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum BreakdownOrder {
    /// Order in which each category first appears in the input.
    #[default]
    FirstSeen,
    /// Largest total first; ties keep first-seen order.
    ByTotalDesc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryShare {
    pub(crate) category: String,
    pub(crate) total: Decimal,
    pub(crate) count: usize,
    /// Share of the grand total, 0–100.
    pub(crate) percentage: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CategoryBreakdown {
    pub(crate) grand_total: Decimal,
    pub(crate) shares: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    pub(crate) fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, category: &str) -> Option<&CategoryShare> {
        self.shares.iter().find(|s| s.category == category)
    }
}

pub(crate) fn category_breakdown(expenses: &[Expense], order: BreakdownOrder) -> CategoryBreakdown {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut shares: Vec<CategoryShare> = Vec::new();

    for expense in expenses {
        let slot = *index.entry(expense.category.as_str()).or_insert_with(|| {
            shares.push(CategoryShare {
                category: expense.category.clone(),
                total: Decimal::ZERO,
                count: 0,
                percentage: Decimal::ZERO,
            });
            shares.len() - 1
        });
        let share = &mut shares[slot];
        share.total = share.total.saturating_add(expense.amount);
        share.count += 1;
    }

    let grand_total = shares
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.total));
    if !grand_total.is_zero() {
        for share in &mut shares {
            share.percentage = share
                .total
                .checked_div(grand_total)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ONE_HUNDRED);
        }
    }

    if order == BreakdownOrder::ByTotalDesc {
        // sort_by is stable, so equal totals stay in first-seen order
        shares.sort_by(|a, b| b.total.cmp(&a.total));
    }

    CategoryBreakdown {
        grand_total,
        shares,
    }
}

#[cfg(test)]
#[path = "breakdown_tests.rs"]
mod tests;
