use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analytics::{self, BreakdownOrder, BudgetStatus, ExpenseFilter};
use crate::cli::{BudgetAction, CategoriesAction, Commands, FilterArgs};
use crate::db::{Database, ExpenseStore};
use crate::models::{icon_for, Category, Expense, ICON_NAMES, MAX_AMOUNT};
use crate::util::{format_amount, format_date, format_percent, format_trend, truncate};

const DEFAULT_EXPORT_FILE: &str = "expenses_report.csv";

pub(crate) fn run<Tz: TimeZone, W: Write>(
    command: Commands,
    db: &Database,
    now: &DateTime<Tz>,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::Add {
            amount,
            category,
            note,
        } => cmd_add(db, now, out, amount, &category, &note),
        Commands::Edit {
            id,
            amount,
            category,
            note,
        } => cmd_edit(db, out, id, amount, category, note),
        Commands::Delete { id } => cmd_delete(db, out, id),
        Commands::Clear { yes } => cmd_clear(db, out, yes),
        Commands::List { filter, limit } => cmd_list(db, now, out, &filter, limit),
        Commands::Insights { filter } => cmd_insights(db, now, out, &filter),
        Commands::Breakdown { filter, by_total } => cmd_breakdown(db, now, out, &filter, by_total),
        Commands::Export { path, filter } => {
            let path = path.unwrap_or_else(default_export_path);
            cmd_export(db, now, out, &path, &filter)
        }
        Commands::Today => cmd_today(db, now, out),
        Commands::Categories { action } => match action.unwrap_or(CategoriesAction::List) {
            CategoriesAction::List => cmd_categories_list(db, out),
            CategoriesAction::Add { name, icon } => cmd_categories_add(db, out, &name, icon),
            CategoriesAction::Remove { name } => cmd_categories_remove(db, out, &name),
        },
        Commands::Budget { action } => match action.unwrap_or(BudgetAction::Show) {
            BudgetAction::Show => cmd_budget_show(db, out),
            BudgetAction::Set { weekly, monthly } => cmd_budget_set(db, out, weekly, monthly),
        },
    }
}

// ── Input validation ──────────────────────────────────────────

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        anyhow::bail!("Amount must be greater than zero (got {amount})");
    }
    if amount > MAX_AMOUNT {
        anyhow::bail!("Amount must not exceed {} (got {amount})", format_amount(MAX_AMOUNT));
    }
    Ok(())
}

/// A zero limit is allowed and shows no progress.
fn validate_limit(limit: Decimal) -> Result<()> {
    if limit < Decimal::ZERO {
        anyhow::bail!("Limit must not be negative (got {limit})");
    }
    if limit > MAX_AMOUNT {
        anyhow::bail!("Limit must not exceed {} (got {limit})", format_amount(MAX_AMOUNT));
    }
    Ok(())
}

fn validate_category(db: &Database, category: &str) -> Result<String> {
    let category = category.trim();
    if category.is_empty() {
        anyhow::bail!("Category must not be blank");
    }
    let known = db.get_categories()?;
    if Category::find_by_name(&known, category).is_none() {
        warn!(category, "category is not in the configured set");
    }
    Ok(category.to_string())
}

// ── Expenses ──────────────────────────────────────────────────

fn cmd_add<Tz: TimeZone, W: Write>(
    db: &Database,
    now: &DateTime<Tz>,
    out: &mut W,
    amount: Decimal,
    category: &str,
    note: &str,
) -> Result<()> {
    validate_amount(amount)?;
    let category = validate_category(db, category)?;
    let expense = Expense::at(amount, category, note.to_string(), now.timestamp_millis());
    let id = db.add(&expense)?;
    info!(id, %amount, category = %expense.category, "added expense");
    writeln!(
        out,
        "Added #{id}: {} {} [{}]",
        format_amount(amount),
        expense.category,
        db.category_icon(&expense.category)?
    )?;
    Ok(())
}

fn cmd_edit<W: Write>(
    db: &Database,
    out: &mut W,
    id: i64,
    amount: Option<Decimal>,
    category: Option<String>,
    note: Option<String>,
) -> Result<()> {
    let mut expense = db
        .get_expense(id)?
        .ok_or_else(|| anyhow::anyhow!("Expense #{id} not found"))?;

    if let Some(amount) = amount {
        validate_amount(amount)?;
        expense.amount = amount;
    }
    if let Some(category) = category {
        expense.category = validate_category(db, &category)?;
    }
    if let Some(note) = note {
        expense.note = note;
    }

    db.replace(&expense)?;
    info!(id, "updated expense");
    writeln!(
        out,
        "Updated #{id}: {} {}",
        format_amount(expense.amount),
        expense.category
    )?;
    Ok(())
}

fn cmd_delete<W: Write>(db: &Database, out: &mut W, id: i64) -> Result<()> {
    if !db.delete(id)? {
        anyhow::bail!("Expense #{id} not found");
    }
    info!(id, "deleted expense");
    writeln!(out, "Deleted #{id}")?;
    Ok(())
}

fn cmd_clear<W: Write>(db: &Database, out: &mut W, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("Refusing to delete all expenses without --yes");
    }
    let count = db.clear()?;
    info!(count, "cleared all expenses");
    writeln!(out, "Deleted {count} expenses")?;
    Ok(())
}

/// Snapshot of the store narrowed by the command-line filter.
fn filtered<Tz: TimeZone>(
    db: &Database,
    now: &DateTime<Tz>,
    args: &FilterArgs,
) -> Result<(ExpenseFilter, Vec<Expense>, Vec<Expense>)> {
    let filter = args.to_filter(&now.timezone())?;
    let all = db.list()?;
    let visible = filter.apply(&all, now);
    Ok((filter, all, visible))
}

fn window_label(filter: &ExpenseFilter) -> &'static str {
    filter.window.as_ref().map_or("All Time", |w| w.label())
}

fn cmd_list<Tz: TimeZone, W: Write>(
    db: &Database,
    now: &DateTime<Tz>,
    out: &mut W,
    args: &FilterArgs,
    limit: Option<usize>,
) -> Result<()> {
    let (filter, _, visible) = filtered(db, now, args)?;
    let categories = db.get_categories()?;
    let tz = now.timezone();

    if visible.is_empty() {
        if filter.is_active() {
            writeln!(out, "No expenses match the filter")?;
        } else {
            writeln!(out, "No expenses yet")?;
        }
    } else {
        writeln!(
            out,
            "{:<6} {:<13} {:<16} {:<14} {:>12}  Note",
            "ID", "Date", "Category", "Icon", "Amount"
        )?;
        writeln!(out, "{}", "─".repeat(80))?;
        for expense in visible.iter().take(limit.unwrap_or(usize::MAX)) {
            writeln!(
                out,
                "{:<6} {:<13} {:<16} {:<14} {:>12}  {}",
                expense.id.unwrap_or(0),
                format_date(expense.timestamp, &tz),
                truncate(&expense.category, 16),
                icon_for(&categories, &expense.category),
                format_amount(expense.amount),
                truncate(&expense.note, 30),
            )?;
        }
    }

    let spent = analytics::total(&visible);
    let status = BudgetStatus::evaluate(spent, filter.window, &db.get_budget_limits()?);
    writeln!(out)?;
    writeln!(
        out,
        "Total Spending ({}): {}  [{} entries]",
        window_label(&filter),
        format_amount(spent),
        visible.len()
    )?;
    writeln!(
        out,
        "Budget: {} of {} ({}){}",
        format_amount(status.spent),
        format_amount(status.limit),
        format_percent(status.progress * Decimal::ONE_HUNDRED),
        if status.over_budget { "  OVER BUDGET" } else { "" }
    )?;
    if filter.window.is_some() && !status.over_budget {
        writeln!(out, "Remaining: {}", format_amount(status.remaining().max(Decimal::ZERO)))?;
    }
    Ok(())
}

fn cmd_insights<Tz: TimeZone, W: Write>(
    db: &Database,
    now: &DateTime<Tz>,
    out: &mut W,
    args: &FilterArgs,
) -> Result<()> {
    let (filter, all, visible) = filtered(db, now, args)?;
    let tz = now.timezone();

    // The trend picks its own two months, so only search/category narrow it
    let trend_filter = ExpenseFilter {
        window: None,
        ..filter.clone()
    };
    let trend_base = trend_filter.apply(&all, now);

    let projection = analytics::projected_monthly_total(&visible, now);
    let trend = analytics::month_over_month_trend(&trend_base, now);
    let daily_avg = analytics::daily_average(&visible, &tz);

    writeln!(out, "Insights ({})", window_label(&filter))?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Monthly Projection: {}", format_amount(projection))?;
    writeln!(out, "  Trend:              {}", format_trend(trend))?;
    writeln!(out, "  Daily Avg:          {}", format_amount(daily_avg))?;
    writeln!(out, "  Total Count:        {} entries", visible.len())?;
    writeln!(out)?;
    write_breakdown(db, out, &visible, BreakdownOrder::FirstSeen)
}

fn cmd_breakdown<Tz: TimeZone, W: Write>(
    db: &Database,
    now: &DateTime<Tz>,
    out: &mut W,
    args: &FilterArgs,
    by_total: bool,
) -> Result<()> {
    let (_, _, visible) = filtered(db, now, args)?;
    let order = if by_total {
        BreakdownOrder::ByTotalDesc
    } else {
        BreakdownOrder::FirstSeen
    };
    write_breakdown(db, out, &visible, order)
}

fn write_breakdown<W: Write>(
    db: &Database,
    out: &mut W,
    expenses: &[Expense],
    order: BreakdownOrder,
) -> Result<()> {
    let breakdown = analytics::category_breakdown(expenses, order);
    writeln!(out, "Spending Breakdown")?;
    if breakdown.is_empty() {
        writeln!(out, "  No spending")?;
        return Ok(());
    }
    let categories = db.get_categories()?;
    for share in &breakdown.shares {
        writeln!(
            out,
            "  {:<14} {:<20} {:>5} {:>14}",
            icon_for(&categories, &share.category),
            truncate(&share.category, 20),
            format_percent(share.percentage),
            format_amount(share.total),
        )?;
    }
    writeln!(out, "  {:<35} {:>5} {:>14}", "Total", "", format_amount(breakdown.grand_total))?;
    Ok(())
}

fn cmd_export<Tz: TimeZone, W: Write>(
    db: &Database,
    now: &DateTime<Tz>,
    out: &mut W,
    path: &Path,
    args: &FilterArgs,
) -> Result<()> {
    let (_, _, visible) = filtered(db, now, args)?;
    let count = crate::export::export_to_path(&visible, &now.timezone(), path)?;
    writeln!(out, "Exported {count} expenses to {}", path.display())?;
    Ok(())
}

fn cmd_today<Tz: TimeZone, W: Write>(db: &Database, now: &DateTime<Tz>, out: &mut W) -> Result<()> {
    let all = db.list()?;
    let total = analytics::today_total(&all, now);
    writeln!(out, "Today: {}", format_amount(total))?;
    Ok(())
}

fn default_export_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_EXPORT_FILE)
}

// ── Categories ────────────────────────────────────────────────

fn cmd_categories_list<W: Write>(db: &Database, out: &mut W) -> Result<()> {
    let categories = db.get_categories()?;
    if categories.is_empty() {
        writeln!(out, "No categories")?;
        return Ok(());
    }
    writeln!(out, "{:<20} Icon", "Name")?;
    writeln!(out, "{}", "─".repeat(34))?;
    for cat in &categories {
        writeln!(out, "{:<20} {}", cat.name, cat.icon_name())?;
    }
    Ok(())
}

fn cmd_categories_add<W: Write>(
    db: &Database,
    out: &mut W,
    name: &str,
    icon: Option<String>,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Category name must not be blank");
    }
    let category = match icon {
        Some(icon) => {
            let known = ICON_NAMES
                .iter()
                .find(|n| n.eq_ignore_ascii_case(&icon))
                .ok_or_else(|| {
                    anyhow::anyhow!("Unknown icon '{icon}'. Choose one of: {}", ICON_NAMES.join(", "))
                })?;
            Category::with_icon(name.to_string(), known.to_string())
        }
        None => Category::new(name.to_string()),
    };
    if db.add_category(&category)? {
        info!(name, icon = category.icon_name(), "added category");
        writeln!(out, "Added category: {name} ({})", category.icon_name())?;
    } else {
        writeln!(out, "Category already exists: {name}")?;
    }
    Ok(())
}

fn cmd_categories_remove<W: Write>(db: &Database, out: &mut W, name: &str) -> Result<()> {
    if !db.delete_category(name)? {
        anyhow::bail!("Category '{name}' not found");
    }
    info!(name, "removed category");
    writeln!(out, "Removed category: {name}")?;
    Ok(())
}

// ── Budgets ───────────────────────────────────────────────────

fn cmd_budget_show<W: Write>(db: &Database, out: &mut W) -> Result<()> {
    let limits = db.get_budget_limits()?;
    writeln!(out, "Weekly limit:  {}", format_amount(limits.weekly))?;
    writeln!(out, "Monthly limit: {}", format_amount(limits.monthly))?;
    Ok(())
}

fn cmd_budget_set<W: Write>(
    db: &Database,
    out: &mut W,
    weekly: Option<Decimal>,
    monthly: Option<Decimal>,
) -> Result<()> {
    if weekly.is_none() && monthly.is_none() {
        anyhow::bail!("Nothing to set. Use --weekly and/or --monthly");
    }
    if let Some(limit) = weekly {
        validate_limit(limit).context("Invalid weekly limit")?;
        db.set_weekly_limit(limit)?;
        info!(%limit, "set weekly limit");
    }
    if let Some(limit) = monthly {
        validate_limit(limit).context("Invalid monthly limit")?;
        db.set_monthly_limit(limit)?;
        info!(%limit, "set monthly limit");
    }
    cmd_budget_show(db, out)
}
