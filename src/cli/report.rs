//! Report CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    budget_table, format_percentage, format_trend_chart, spending_table, trend_table,
    CurrencyFormat,
};
use crate::error::PocketResult;
use crate::export::{export_budgets_csv, export_spending_csv, export_trend_csv};
use crate::models::{TransactionFilter, TransactionType};
use crate::reports::{
    compute_overview, income_by_category, monthly_trend, spend_by_category, summarize,
    top_categories,
};
use crate::storage::{Ledger, Storage};

use super::{parse_date, parse_range, write_output};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses and balance over a range
    Summary {
        /// "2025", "2025-11" or "2025-11-01..2025-11-15"; defaults to this month
        #[arg(short, long)]
        range: Option<String>,
    },
    /// Spending (or income) by category
    Spending {
        #[arg(short, long)]
        range: Option<String>,
        /// Break down income instead of expenses
        #[arg(long)]
        income: bool,
        /// Show only the largest N categories, folding the rest into "Other"
        #[arg(short, long)]
        top: Option<usize>,
        /// Write CSV to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Progress of every budget
    Budgets {
        #[arg(long)]
        as_of: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Month-by-month income and expenses
    Trend {
        /// Number of months, ending with the current one
        #[arg(short, long, default_value = "6")]
        months: usize,
        /// Last month to include (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> PocketResult<()> {
    let fmt = CurrencyFormat::from_settings(settings);

    match cmd {
        ReportCommands::Summary { range } => {
            let range = parse_range(range.as_deref())?;
            let transactions = storage.list_transactions(&TransactionFilter::all())?;
            let summary = summarize(&transactions, Some(&range));

            println!("Summary for {}", range);
            println!("  Income:       {:>20}", fmt.format(summary.income));
            println!("  Expenses:     {:>20}", fmt.format(summary.expenses));
            println!("  Balance:      {:>20}", fmt.format(summary.balance));
            println!(
                "  Savings rate: {:>20}",
                format_percentage(summary.savings_rate(), 1)
            );
        }

        ReportCommands::Spending {
            range,
            income,
            top,
            output,
        } => {
            let range = parse_range(range.as_deref())?;
            let kind = if income {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };
            let transactions = storage
                .list_transactions(&TransactionFilter::all().with_kind(kind).with_range(range))?;
            let categories = storage.list_categories()?;

            let mut spends = if income {
                income_by_category(&transactions, &categories)
            } else {
                spend_by_category(&transactions, &categories)
            };
            if let Some(n) = top {
                spends = top_categories(&spends, n);
            }

            match output {
                Some(path) => write_output(Some(&path), |w| export_spending_csv(&spends, w))?,
                None => {
                    println!("{} by category, {}", if income { "Income" } else { "Spending" }, range);
                    println!("{}", spending_table(&spends, &fmt));
                }
            }
        }

        ReportCommands::Budgets { as_of, output } => {
            let overview = compute_overview(
                &storage.list_budgets()?,
                &storage.list_transactions(&TransactionFilter::all())?,
                parse_date(as_of.as_deref())?,
                settings.week_start(),
            )?;

            match output {
                Some(path) => write_output(Some(&path), |w| {
                    export_budgets_csv(&overview.budgets, w)
                })?,
                None => println!("{}", budget_table(&overview, &fmt)),
            }
        }

        ReportCommands::Trend {
            months,
            as_of,
            output,
        } => {
            let transactions = storage.list_transactions(&TransactionFilter::all())?;
            let trend = monthly_trend(&transactions, parse_date(as_of.as_deref())?, months);

            match output {
                Some(path) => write_output(Some(&path), |w| export_trend_csv(&trend, w))?,
                None => {
                    println!("{}", trend_table(&trend, &fmt));
                    println!();
                    print!("{}", format_trend_chart(&trend));
                }
            }
        }
    }

    Ok(())
}
