mod budget;
mod category;
mod expense;

pub(crate) use budget::{BudgetLimits, MAX_AMOUNT};
pub(crate) use category::{icon_for, resolve_icon, Category, DEFAULT_CATEGORIES, FALLBACK_ICON, ICON_NAMES};
pub(crate) use expense::Expense;

#[cfg(test)]
mod tests;
