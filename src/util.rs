use chrono::TimeZone;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::analytics::to_local;

pub(crate) const CURRENCY_SYMBOL: &str = "$";

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.891` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if rounded < Decimal::ZERO {
        format!("-{CURRENCY_SYMBOL}{with_commas}.{dec_part}")
    } else {
        format!("{CURRENCY_SYMBOL}{with_commas}.{dec_part}")
    }
}

/// Whole-number percentage, e.g. `59.6` → `"60%"`.
pub(crate) fn format_percent(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{}%", rounded.normalize())
}

/// Month-over-month trend as shown on the insights card.
/// Positive values are an increase; zero and negatives read as a decrease.
pub(crate) fn format_trend(val: Decimal) -> String {
    let magnitude = val
        .abs()
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let direction = if val > Decimal::ZERO { "increase" } else { "decrease" };
    format!("{magnitude:.1}% {direction}")
}

/// Local display date, e.g. `"Jan 29, 2026"`.
pub(crate) fn format_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String {
    match to_local(timestamp, tz) {
        Some(dt) => dt.date_naive().format("%b %d, %Y").to_string(),
        None => "-".to_string(),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

#[cfg(test)]
#[path = "util_tests.rs"]
mod tests;
