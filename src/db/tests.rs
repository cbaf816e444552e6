#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn expense(amount: Decimal, category: &str, note: &str, timestamp: i64) -> Expense {
    Expense::at(amount, category.into(), note.into(), timestamp)
}

// ── Default data ──────────────────────────────────────────────

#[test]
fn test_default_categories_seeded() {
    let db = Database::open_in_memory().unwrap();
    let cats = db.get_categories().unwrap();
    assert_eq!(cats.len(), DEFAULT_CATEGORIES.len());
    assert!(cats.iter().any(|c| c.name == "Food"));
    assert!(cats.iter().any(|c| c.name == "Travel"));
}

#[test]
fn test_categories_sorted_by_name() {
    let db = Database::open_in_memory().unwrap();
    db.add_category(&Category::new("Books".into())).unwrap();
    let names: Vec<String> = db.get_categories().unwrap().into_iter().map(|c| c.name).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names[0], "Books");
}

#[test]
fn test_reopen_keeps_data_and_does_not_reseed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exptrack.db");
    {
        let db = Database::open(&path).unwrap();
        db.delete_category("Food").unwrap();
        db.add(&expense(dec!(5), "Food", "", 1)).unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_categories().unwrap().len(), DEFAULT_CATEGORIES.len() - 1);
    assert_eq!(db.list().unwrap().len(), 1);
}

#[test]
fn test_missing_schema_version_row_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exptrack.db");
    drop(Database::open(&path).unwrap());
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute("DELETE FROM schema_version", []).unwrap();
    }
    let err = Database::open(&path).err().unwrap();
    assert!(format!("{err:#}").contains("schema version"));
}

// ── Expense CRUD ──────────────────────────────────────────────

#[test]
fn test_add_and_get_expense() {
    let db = Database::open_in_memory().unwrap();
    let id = db.add(&expense(dec!(42.50), "Food", "Dinner", 1_760_000_000_000)).unwrap();

    let fetched = db.get_expense(id).unwrap().unwrap();
    assert_eq!(fetched.id, Some(id));
    assert_eq!(fetched.amount, dec!(42.50));
    assert_eq!(fetched.category, "Food");
    assert_eq!(fetched.note, "Dinner");
    assert_eq!(fetched.timestamp, 1_760_000_000_000);
}

#[test]
fn test_get_expense_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_expense(99999).unwrap().is_none());
}

#[test]
fn test_list_newest_first() {
    let db = Database::open_in_memory().unwrap();
    db.add(&expense(dec!(1), "Food", "old", 1_000)).unwrap();
    db.add(&expense(dec!(2), "Food", "new", 3_000)).unwrap();
    db.add(&expense(dec!(3), "Food", "middle", 2_000)).unwrap();

    let notes: Vec<String> = db.list().unwrap().into_iter().map(|e| e.note).collect();
    assert_eq!(notes, vec!["new", "middle", "old"]);
}

#[test]
fn test_list_same_timestamp_orders_by_id_desc() {
    let db = Database::open_in_memory().unwrap();
    let first = db.add(&expense(dec!(1), "Food", "first", 1_000)).unwrap();
    let second = db.add(&expense(dec!(2), "Food", "second", 1_000)).unwrap();
    let ids: Vec<i64> = db.list().unwrap().into_iter().filter_map(|e| e.id).collect();
    assert_eq!(ids, vec![second, first]);
}

#[test]
fn test_amount_precision_preserved() {
    let db = Database::open_in_memory().unwrap();
    let id = db.add(&expense(dec!(0.10), "Food", "", 1)).unwrap();
    let fetched = db.get_expense(id).unwrap().unwrap();
    assert_eq!(fetched.amount.to_string(), "0.10");
}

#[test]
fn test_replace_keeps_id_and_timestamp() {
    let db = Database::open_in_memory().unwrap();
    let id = db.add(&expense(dec!(10), "Food", "Lunch", 5_000)).unwrap();

    let mut edited = db.get_expense(id).unwrap().unwrap();
    edited.amount = dec!(12);
    edited.category = "Travel".into();
    db.replace(&edited).unwrap();

    let all = db.list().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, Some(id));
    assert_eq!(all[0].amount, dec!(12));
    assert_eq!(all[0].category, "Travel");
    assert_eq!(all[0].timestamp, 5_000);
}

#[test]
fn test_replace_without_id_fails() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.replace(&expense(dec!(1), "Food", "", 1)).is_err());
}

#[test]
fn test_delete_expense() {
    let db = Database::open_in_memory().unwrap();
    let id = db.add(&expense(dec!(1), "Food", "", 1)).unwrap();
    assert!(db.delete(id).unwrap());
    assert!(!db.delete(id).unwrap());
    assert_eq!(db.get_expense_count().unwrap(), 0);
}

#[test]
fn test_clear_expenses() {
    let db = Database::open_in_memory().unwrap();
    for i in 0..5 {
        db.add(&expense(dec!(1), "Food", "", i)).unwrap();
    }
    assert_eq!(db.clear().unwrap(), 5);
    assert!(db.list().unwrap().is_empty());
    // Categories are untouched
    assert!(!db.get_categories().unwrap().is_empty());
}

#[test]
fn test_zero_and_negative_amounts_not_rejected() {
    let db = Database::open_in_memory().unwrap();
    db.add(&expense(Decimal::ZERO, "Food", "", 1)).unwrap();
    db.add(&expense(dec!(-3), "Food", "", 2)).unwrap();
    assert_eq!(db.get_expense_count().unwrap(), 2);
}

// ── Categories ────────────────────────────────────────────────

#[test]
fn test_add_category_with_icon() {
    let db = Database::open_in_memory().unwrap();
    assert!(db
        .add_category(&Category::with_icon("Gym".into(), "Gym".into()))
        .unwrap());
    assert_eq!(db.category_icon("Gym").unwrap(), "Gym");
}

#[test]
fn test_add_duplicate_category_is_noop() {
    let db = Database::open_in_memory().unwrap();
    let before = db.get_categories().unwrap().len();
    assert!(!db.add_category(&Category::new("Food".into())).unwrap());
    assert_eq!(db.get_categories().unwrap().len(), before);
    // Existing icon is not overwritten
    assert_eq!(db.category_icon("Food").unwrap(), "Fastfood");
}

#[test]
fn test_delete_category_does_not_cascade() {
    let db = Database::open_in_memory().unwrap();
    db.add(&expense(dec!(9), "Shopping", "Socks", 1)).unwrap();
    assert!(db.delete_category("Shopping").unwrap());
    assert!(!db.delete_category("Shopping").unwrap());

    let all = db.list().unwrap();
    assert_eq!(all[0].category, "Shopping");
    assert_eq!(db.category_icon("Shopping").unwrap(), FALLBACK_ICON);
}

#[test]
fn test_category_without_icon_falls_back() {
    let db = Database::open_in_memory().unwrap();
    db.add_category(&Category::new("Pets".into())).unwrap();
    assert_eq!(db.category_icon("Pets").unwrap(), FALLBACK_ICON);
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_budget_defaults() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_budget_limits().unwrap(), BudgetLimits::default());
}

#[test]
fn test_budget_latest_write_wins() {
    let db = Database::open_in_memory().unwrap();
    db.set_weekly_limit(dec!(700)).unwrap();
    db.set_weekly_limit(dec!(650.50)).unwrap();
    db.set_monthly_limit(dec!(3000)).unwrap();

    let limits = db.get_budget_limits().unwrap();
    assert_eq!(limits.weekly, dec!(650.50));
    assert_eq!(limits.monthly, dec!(3000));
}

#[test]
fn test_budget_limits_independent() {
    let db = Database::open_in_memory().unwrap();
    db.set_monthly_limit(dec!(100)).unwrap();
    let limits = db.get_budget_limits().unwrap();
    assert_eq!(limits.weekly, BudgetLimits::default().weekly);
    assert_eq!(limits.monthly, dec!(100));
}
