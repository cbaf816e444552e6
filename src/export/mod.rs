use anyhow::{Context, Result};
use chrono::TimeZone;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::analytics::local_date;
use crate::models::Expense;

pub(crate) const HEADER: [&str; 4] = ["Date", "Category", "Amount", "Note"];

/// Write `expenses` as CSV: `Date,Category,Amount,Note`, one row per expense
/// in input order. Dates are local `YYYY-MM-DD`, text fields are trimmed and
/// amounts are written as plain decimals.
pub(crate) fn write_csv<W: Write, Tz: TimeZone>(expenses: &[Expense], tz: &Tz, writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for expense in expenses {
        let date = local_date(expense.timestamp, tz)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let amount = expense.amount.to_string();
        wtr.write_record([
            date.as_str(),
            expense.category.trim(),
            amount.as_str(),
            expense.note.trim(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(expenses.len())
}

pub(crate) fn export_to_path<Tz: TimeZone>(expenses: &[Expense], tz: &Tz, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_csv(expenses, tz, file)?;
    info!(count, path = %path.display(), "exported expenses");
    Ok(count)
}
