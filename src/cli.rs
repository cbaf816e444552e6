//! Command-line argument definitions.
//!
//! The command implementations live in the `commands` module.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::analytics::{ExpenseFilter, TimeWindow};

/// exptrack - track expenses and see where the money goes
#[derive(Parser, Debug)]
#[command(name = "exptrack")]
#[command(about = "Local-only personal expense tracker", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub(crate) db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Log a new expense
    Add {
        /// Amount spent (must be greater than zero)
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,

        /// Category label
        category: String,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Replace an expense's amount, category or note (timestamp is kept)
    Edit {
        id: i64,

        #[arg(long, allow_negative_numbers = true)]
        amount: Option<Decimal>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Delete an expense by id
    Delete { id: i64 },

    /// Delete every expense
    Clear {
        /// Confirm deletion of all data
        #[arg(long)]
        yes: bool,
    },

    /// List expenses matching the filter, with total and budget status
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show at most this many rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Projection, trend, daily average and category breakdown
    Insights {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Spending per category with percentage shares
    Breakdown {
        #[command(flatten)]
        filter: FilterArgs,

        /// Sort by descending total instead of first appearance
        #[arg(long)]
        by_total: bool,
    },

    /// Export the filtered expenses to CSV
    Export {
        /// Output file (default: ~/expenses_report.csv)
        path: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Total spent today
    Today,

    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Show or set weekly/monthly budget limits
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum CategoriesAction {
    /// List categories with their icons
    List,

    /// Add a category
    Add {
        name: String,

        /// Icon name (Fastfood, Transport, Rent, Shopping, Entertainment,
        /// Smoking, Travel, School, Gym, Health, Label)
        #[arg(long)]
        icon: Option<String>,
    },

    /// Remove a category (existing expenses keep the label)
    Remove { name: String },
}

#[derive(Subcommand, Debug)]
pub(crate) enum BudgetAction {
    /// Show current limits
    Show,

    /// Set one or both limits
    Set {
        #[arg(long)]
        weekly: Option<Decimal>,

        #[arg(long)]
        monthly: Option<Decimal>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowArg {
    Today,
    Week,
    Month,
    All,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct FilterArgs {
    /// Time window
    #[arg(short, long, value_enum, default_value = "month")]
    pub(crate) window: WindowArg,

    /// Start date of an explicit range (YYYY-MM-DD, inclusive)
    #[arg(long, requires = "to", conflicts_with = "window")]
    pub(crate) from: Option<NaiveDate>,

    /// End date of an explicit range (YYYY-MM-DD, inclusive)
    #[arg(long, requires = "from", conflicts_with = "window")]
    pub(crate) to: Option<NaiveDate>,

    /// Case-insensitive text to find in category or note
    #[arg(short, long, default_value = "")]
    pub(crate) search: String,

    /// Only this exact category
    #[arg(short, long)]
    pub(crate) category: Option<String>,
}

impl Default for FilterArgs {
    fn default() -> Self {
        Self {
            window: WindowArg::Month,
            from: None,
            to: None,
            search: String::new(),
            category: None,
        }
    }
}

impl FilterArgs {
    /// An explicit `--from/--to` range takes precedence over `--window`.
    pub(crate) fn time_window<Tz: TimeZone>(&self, tz: &Tz) -> Result<Option<TimeWindow>> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            let start = local_millis(tz, start_of_day(from)?)?;
            let end = local_millis(tz, end_of_day(to)?)?;
            return Ok(Some(TimeWindow::Range { start, end }));
        }
        Ok(match self.window {
            WindowArg::Today => Some(TimeWindow::Today),
            WindowArg::Week => Some(TimeWindow::ThisWeek),
            WindowArg::Month => Some(TimeWindow::ThisMonth),
            WindowArg::All => None,
        })
    }

    pub(crate) fn to_filter<Tz: TimeZone>(&self, tz: &Tz) -> Result<ExpenseFilter> {
        let filter = ExpenseFilter::new(self.time_window(tz)?).with_search(self.search.as_str());
        Ok(match &self.category {
            Some(category) => filter.with_category(category.as_str()),
            None => filter,
        })
    }
}

fn start_of_day(date: NaiveDate) -> Result<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid date: {date}"))
}

fn end_of_day(date: NaiveDate) -> Result<NaiveDateTime> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| anyhow::anyhow!("Invalid date: {date}"))
}

fn local_millis<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Result<i64> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| anyhow::anyhow!("{naive} does not exist in the local time zone"))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
