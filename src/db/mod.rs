mod schema;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::models::*;

/// Read/write access to the stored expense collection.
pub(crate) trait ExpenseStore {
    /// Snapshot of every expense, newest first.
    fn list(&self) -> Result<Vec<Expense>>;
    /// Insert a new expense, returning its assigned id.
    fn add(&self, expense: &Expense) -> Result<i64>;
    /// Replace the stored row that has the same id.
    fn replace(&self, expense: &Expense) -> Result<()>;
    fn delete(&self, id: i64) -> Result<bool>;
    fn clear(&self) -> Result<usize>;
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        debug!(path = %path.display(), "opened database");
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_default_categories()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_default_categories()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            debug!(version = schema::CURRENT_VERSION, "creating schema");
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .context("Failed to read schema version")?;

        let tx = self.conn.transaction()?;
        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                debug!(from_version, "applying migration");
                tx.execute_batch(sql)?;
            }
        }
        if current < schema::CURRENT_VERSION {
            tx.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    /// Seeds the default categories into an empty table. A user who deletes
    /// every category gets the defaults back on the next open.
    fn seed_default_categories(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        for (name, icon) in DEFAULT_CATEGORIES {
            tx.execute(
                "INSERT OR IGNORE INTO categories (name, icon) VALUES (?1, ?2)",
                params![name, icon],
            )?;
        }
        tx.commit()?;
        debug!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, amount, category, note, timestamp FROM expenses WHERE id = ?1",
                params![id],
                expense_from_row,
            )
            .optional()?)
    }

    pub(crate) fn get_expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, icon FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                name: row.get(0)?,
                icon: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Adds a category; returns `false` if the name already exists.
    pub(crate) fn add_category(&self, category: &Category) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO categories (name, icon) VALUES (?1, ?2)",
            params![category.name, category.icon],
        )?;
        Ok(inserted > 0)
    }

    /// Removes a category. Expenses keep the label.
    pub(crate) fn delete_category(&self, name: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM categories WHERE name = ?1", params![name])?;
        Ok(deleted > 0)
    }

    /// Icon name for a category label, falling back for unknown labels.
    pub(crate) fn category_icon(&self, name: &str) -> Result<String> {
        let icon: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT icon FROM categories WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(resolve_icon(icon.flatten().as_deref()).to_string())
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn get_budget_limits(&self) -> Result<BudgetLimits> {
        let defaults = BudgetLimits::default();
        Ok(BudgetLimits {
            weekly: self
                .get_decimal_setting(schema::WEEKLY_LIMIT_KEY)?
                .unwrap_or(defaults.weekly),
            monthly: self
                .get_decimal_setting(schema::MONTHLY_LIMIT_KEY)?
                .unwrap_or(defaults.monthly),
        })
    }

    pub(crate) fn set_weekly_limit(&self, limit: Decimal) -> Result<()> {
        self.set_setting(schema::WEEKLY_LIMIT_KEY, &limit.to_string())
    }

    pub(crate) fn set_monthly_limit(&self, limit: Decimal) -> Result<()> {
        self.set_setting(schema::MONTHLY_LIMIT_KEY, &limit.to_string())
    }

    fn get_decimal_setting(&self, key: &str) -> Result<Option<Decimal>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        value
            .map(|v| {
                Decimal::from_str(&v).with_context(|| format!("Invalid value for setting {key}: {v}"))
            })
            .transpose()
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}

impl ExpenseStore for Database {
    fn list(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, category, note, timestamp FROM expenses
             ORDER BY timestamp DESC, id DESC",
        )?;
        let rows = stmt.query_map([], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn add(&self, expense: &Expense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (amount, category, note, timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![
                expense.amount.to_string(),
                expense.category,
                expense.note,
                expense.timestamp,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn replace(&self, expense: &Expense) -> Result<()> {
        let id = expense
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot replace an expense without an id"))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO expenses (id, amount, category, note, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id,
                expense.amount.to_string(),
                expense.category,
                expense.note,
                expense.timestamp,
            ],
        )?;
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    fn clear(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM expenses", [])?)
    }
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let amount_str: String = row.get(1)?;
    let amount = Decimal::from_str(&amount_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    Ok(Expense {
        id: Some(row.get(0)?),
        amount,
        category: row.get(2)?,
        note: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

#[cfg(test)]
mod tests;
