use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expense {
    pub(crate) id: Option<i64>,
    pub(crate) amount: Decimal,
    pub(crate) category: String,
    pub(crate) note: String,
    /// Milliseconds since the Unix epoch.
    pub(crate) timestamp: i64,
}

impl Expense {
    pub(crate) fn new(amount: Decimal, category: String, note: String) -> Self {
        Self::at(amount, category, note, chrono::Utc::now().timestamp_millis())
    }

    pub(crate) fn at(amount: Decimal, category: String, note: String, timestamp: i64) -> Self {
        Self {
            id: None,
            amount,
            category,
            note,
            timestamp,
        }
    }

    /// Case-insensitive substring match against category or note.
    pub(crate) fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.category.to_lowercase().contains(&query) || self.note.to_lowercase().contains(&query)
    }
}
