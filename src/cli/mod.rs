//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod config;
pub mod dashboard;
pub mod goal;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{
    handle_config_command, handle_history_command, handle_init_command, ConfigCommands,
};
pub use dashboard::handle_dashboard_command;
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{PocketError, PocketResult};
use crate::models::{DateRange, Money};

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a YYYY-MM-DD date argument, defaulting to today
pub fn parse_date(value: Option<&str>) -> PocketResult<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            PocketError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(today()),
    }
}

/// Parse an optional YYYY-MM-DD date argument
pub fn parse_optional_date(value: Option<&str>) -> PocketResult<Option<NaiveDate>> {
    value.map(|s| parse_date(Some(s))).transpose()
}

/// Parse an amount argument, allowing the configured currency symbol
pub fn parse_amount(value: &str, settings: &Settings) -> PocketResult<Money> {
    Money::parse_with_symbol(value, &settings.currency_symbol).map_err(|e| {
        PocketError::Validation(format!(
            "Invalid amount '{}': {}. Use a form like '150000' or '10.50'",
            value, e
        ))
    })
}

/// Parse a range argument ("2025", "2025-11" or "2025-11-01..2025-11-15"),
/// defaulting to the current month
pub fn parse_range(value: Option<&str>) -> PocketResult<DateRange> {
    match value {
        Some(s) => DateRange::parse(s).map_err(|e| PocketError::Validation(e.to_string())),
        None => Ok(DateRange::month_of(today())),
    }
}

/// Run `write` against the file at `path`, or stdout when there is none
pub fn write_output<F>(path: Option<&Path>, write: F) -> PocketResult<()>
where
    F: FnOnce(&mut dyn Write) -> PocketResult<()>,
{
    match path {
        Some(path) => {
            let mut file = File::create(path).map_err(|e| {
                PocketError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            write(&mut file)?;
            println!("Exported to {}", path.display());
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write(&mut handle)
        }
    }
}
