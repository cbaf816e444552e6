#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Expense ───────────────────────────────────────────────────

fn make_expense(category: &str, note: &str) -> Expense {
    Expense::at(dec!(12.50), category.into(), note.into(), 1_700_000_000_000)
}

#[test]
fn test_expense_new_defaults() {
    let before = chrono::Utc::now().timestamp_millis();
    let expense = Expense::new(dec!(20), "Food".into(), String::new());
    let after = chrono::Utc::now().timestamp_millis();
    assert!(expense.id.is_none());
    assert_eq!(expense.amount, dec!(20));
    assert!(expense.note.is_empty());
    assert!(expense.timestamp >= before && expense.timestamp <= after);
}

#[test]
fn test_search_matches_note_case_insensitive() {
    let expense = make_expense("Transport", "Bus fare");
    assert!(expense.matches_search("bus"));
    assert!(expense.matches_search("FARE"));
}

#[test]
fn test_search_matches_category() {
    let expense = make_expense("Shopping", "");
    assert!(expense.matches_search("shop"));
    assert!(!expense.matches_search("food"));
}

#[test]
fn test_empty_search_matches_everything() {
    assert!(make_expense("Food", "").matches_search(""));
}

#[test]
fn test_search_unicode_lowercasing() {
    let expense = make_expense("Café", "Crème brûlée");
    assert!(expense.matches_search("CAFÉ"));
    assert!(expense.matches_search("BRÛLÉE"));
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_new_has_fallback_icon() {
    let cat = Category::new("Groceries".into());
    assert!(cat.icon.is_none());
    assert_eq!(cat.icon_name(), FALLBACK_ICON);
}

#[test]
fn test_category_known_icon() {
    let cat = Category::with_icon("Gym".into(), "gym".into());
    assert_eq!(cat.icon_name(), "Gym");
}

#[test]
fn test_category_unknown_icon_falls_back() {
    let cat = Category::with_icon("Pets".into(), "Paw".into());
    assert_eq!(cat.icon_name(), FALLBACK_ICON);
}

#[test]
fn test_category_display() {
    let cat = Category::new("Travel".into());
    assert_eq!(format!("{cat}"), "Travel");
}

#[test]
fn test_icon_for_orphaned_category() {
    let cats = vec![Category::with_icon("Food".into(), "Fastfood".into())];
    assert_eq!(icon_for(&cats, "Food"), "Fastfood");
    assert_eq!(icon_for(&cats, "Deleted"), FALLBACK_ICON);
}

#[test]
fn test_find_by_name_is_exact() {
    let cats = vec![Category::new("Food".into())];
    assert!(Category::find_by_name(&cats, "Food").is_some());
    assert!(Category::find_by_name(&cats, "food").is_none());
}

#[test]
fn test_default_categories_use_known_icons() {
    for (name, icon) in DEFAULT_CATEGORIES {
        assert_eq!(resolve_icon(Some(icon)), *icon, "Unknown icon for {name}");
    }
    assert!(ICON_NAMES.contains(&FALLBACK_ICON));
}

// ── BudgetLimits ──────────────────────────────────────────────

#[test]
fn test_budget_limits_default() {
    let limits = BudgetLimits::default();
    assert_eq!(limits.weekly, dec!(5000));
    assert_eq!(limits.monthly, dec!(25000));
    assert!(limits.weekly > Decimal::ZERO);
}
