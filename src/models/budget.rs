use rust_decimal::Decimal;

pub(crate) const DEFAULT_WEEKLY_LIMIT: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);
pub(crate) const DEFAULT_MONTHLY_LIMIT: Decimal = Decimal::from_parts(25000, 0, 0, false, 0);

/// Largest amount or limit accepted from input: one trillion.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BudgetLimits {
    pub(crate) weekly: Decimal,
    pub(crate) monthly: Decimal,
}

impl Default for BudgetLimits {
    fn default() -> Self {
        Self {
            weekly: DEFAULT_WEEKLY_LIMIT,
            monthly: DEFAULT_MONTHLY_LIMIT,
        }
    }
}
