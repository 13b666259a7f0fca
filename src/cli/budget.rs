//! Budget CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{budget_table, format_percentage, progress_bar, CurrencyFormat};
use crate::error::{PocketError, PocketResult};
use crate::export::export_budgets_csv;
use crate::models::{Budget, BudgetPeriod};
use crate::services::{BudgetService, CategoryService, UpdateBudgetInput};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_optional_date, write_output};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget
    Add {
        /// Budget name
        name: String,
        /// Spending limit per period
        limit: String,
        /// Category name or ID; omit for a budget over all expenses
        #[arg(short, long)]
        category: Option<String>,
        /// daily, weekly, monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: BudgetPeriod,
        /// First day the budget applies (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<String>,
        /// Last day the budget applies (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Fraction of the limit that triggers a warning, in (0, 1]
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Show progress of every budget
    List {
        /// Evaluate as of this date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,
        /// Write CSV to this file instead of printing a table
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show one budget in detail
    Show {
        /// Budget name or ID
        budget: String,
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Change a budget's definition
    Edit {
        /// Budget name or ID
        budget: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New spending limit per period
        #[arg(short, long)]
        limit: Option<String>,
        /// Track this category instead (name or ID)
        #[arg(short, long, conflicts_with = "all_expenses")]
        category: Option<String>,
        /// Track every expense instead of one category
        #[arg(long)]
        all_expenses: bool,
        /// daily, weekly, monthly or yearly
        #[arg(short, long)]
        period: Option<BudgetPeriod>,
        /// New first day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// New last day (YYYY-MM-DD)
        #[arg(long, conflicts_with = "no_end")]
        end: Option<String>,
        /// Remove the end date
        #[arg(long)]
        no_end: bool,
        /// Fraction of the limit that triggers a warning, in (0, 1]
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Change a budget's limit
    SetLimit {
        /// Budget name or ID
        budget: String,
        limit: String,
    },
    /// Delete a budget
    Delete {
        /// Budget name or ID
        budget: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> PocketResult<()> {
    let service = BudgetService::new(storage);
    let fmt = CurrencyFormat::from_settings(settings);
    let week_start = settings.week_start();

    let find = |reference: &str| -> PocketResult<Budget> {
        service
            .find(reference)?
            .ok_or_else(|| PocketError::budget_not_found(reference))
    };

    match cmd {
        BudgetCommands::Add {
            name,
            limit,
            category,
            period,
            start,
            end,
            threshold,
        } => {
            let category_id = category
                .map(|c| CategoryService::new(storage).resolve(&c).map(|c| c.id))
                .transpose()?;

            let mut budget = Budget::new(
                name,
                category_id,
                parse_amount(&limit, settings)?,
                period,
                parse_date(start.as_deref())?,
            )
            .with_alert_threshold(threshold.unwrap_or(settings.default_alert_threshold));
            if let Some(end) = parse_optional_date(end.as_deref())? {
                budget = budget.ending(end);
            }

            let budget = service.create(budget)?;
            println!("Created budget: {}", budget.name);
            println!("  ID:     {}", budget.id);
            println!("  Limit:  {} {}", fmt.format(budget.limit), budget.period);
            println!(
                "  Alerts: at {}",
                format_percentage(budget.alert_threshold * 100.0, 0)
            );
        }

        BudgetCommands::List { as_of, output } => {
            let overview = service.overview(parse_date(as_of.as_deref())?, week_start)?;
            match output {
                Some(path) => write_output(Some(&path), |w| {
                    export_budgets_csv(&overview.budgets, w)
                })?,
                None => println!("{}", budget_table(&overview, &fmt)),
            }
        }

        BudgetCommands::Show { budget, as_of } => {
            let budget = find(&budget)?;
            let progress = service.progress(budget.id, parse_date(as_of.as_deref())?, week_start)?;

            println!("Budget: {}", progress.name);
            println!("  Window:    {}", progress.window);
            println!(
                "  Spent:     {} of {}",
                fmt.format(progress.spent),
                fmt.format(progress.limit)
            );
            println!("  Remaining: {}", fmt.format(progress.remaining));
            println!(
                "  Progress:  {} {}",
                progress_bar(progress.ratio, 20),
                format_percentage(progress.percentage_rounded(), 1)
            );
            println!("  Status:    {}", progress.status);
            if progress.overspent().is_positive() {
                println!("  Over by:   {}", fmt.format(progress.overspent()));
            }
            if progress.expired {
                println!("  This budget has ended.");
            }
        }

        BudgetCommands::Edit {
            budget,
            name,
            limit,
            category,
            all_expenses,
            period,
            start,
            end,
            no_end,
            threshold,
        } => {
            let budget = find(&budget)?;
            let category_id = match category {
                Some(c) => Some(Some(CategoryService::new(storage).resolve(&c)?.id)),
                None if all_expenses => Some(None),
                None => None,
            };
            let end_date = match parse_optional_date(end.as_deref())? {
                Some(end) => Some(Some(end)),
                None if no_end => Some(None),
                None => None,
            };

            let input = UpdateBudgetInput {
                name,
                limit: limit.map(|l| parse_amount(&l, settings)).transpose()?,
                category_id,
                period,
                start_date: parse_optional_date(start.as_deref())?,
                end_date,
                alert_threshold: threshold,
            };
            if input.is_empty() {
                println!("Nothing to change for budget '{}'.", budget.name);
                return Ok(());
            }

            let updated = service.update(budget.id, input)?;
            println!("Updated budget: {}", updated.name);
            println!("  Limit:  {} {}", fmt.format(updated.limit), updated.period);
            match updated.end_date {
                Some(end) => println!("  Runs:   {} to {}", updated.start_date, end),
                None => println!("  Runs:   from {}", updated.start_date),
            }
            println!(
                "  Alerts: at {}",
                format_percentage(updated.alert_threshold * 100.0, 0)
            );
        }

        BudgetCommands::SetLimit { budget, limit } => {
            let budget = find(&budget)?;
            let updated = service.set_limit(budget.id, parse_amount(&limit, settings)?)?;
            println!(
                "Budget '{}' limit: {} -> {}",
                updated.name,
                fmt.format(budget.limit),
                fmt.format(updated.limit)
            );
        }

        BudgetCommands::Delete { budget } => {
            let budget = find(&budget)?;
            service.delete(budget.id)?;
            println!("Deleted budget: {}", budget.name);
        }
    }

    Ok(())
}
