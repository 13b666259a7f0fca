//! CSV export
//!
//! Writes the spending breakdown, budget progress, monthly trend and
//! transaction list as spreadsheet-friendly CSV. Amounts are written in major
//! units with two decimals and no currency symbol.

use std::collections::HashMap;
use std::io::Write;

use crate::error::PocketResult;
use crate::models::{Category, CategoryId, Money, Transaction};
use crate::reports::spending::UNCATEGORIZED;
use crate::reports::{BudgetProgress, CategorySpend, MonthlyTotals};

fn amount(money: Money) -> String {
    format!("{:.2}", money.as_major_f64())
}

/// Export a spending (or income) breakdown
pub fn export_spending_csv<W: Write>(spends: &[CategorySpend], writer: W) -> PocketResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Category", "Amount", "Share %", "Transactions"])?;

    for spend in spends {
        wtr.write_record([
            spend.name.clone(),
            amount(spend.amount),
            format!("{:.1}", spend.percentage),
            spend.transaction_count.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export budget progress rows
pub fn export_budgets_csv<W: Write>(progress: &[BudgetProgress], writer: W) -> PocketResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "Budget",
        "Window Start",
        "Window End",
        "Spent",
        "Limit",
        "Remaining",
        "Percentage",
        "Status",
        "Expired",
    ])?;

    for p in progress {
        wtr.write_record([
            p.name.clone(),
            p.window.start.to_string(),
            p.window.end.to_string(),
            amount(p.spent),
            amount(p.limit),
            amount(p.remaining),
            format!("{:.1}", p.percentage_rounded()),
            p.status.to_string(),
            p.expired.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export per-month totals
pub fn export_trend_csv<W: Write>(trend: &[MonthlyTotals], writer: W) -> PocketResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Month", "Income", "Expenses", "Net"])?;

    for month in trend {
        wtr.write_record([
            month.month.format("%Y-%m").to_string(),
            amount(month.income),
            amount(month.expenses),
            amount(month.net),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export transactions with category names
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    categories: &[Category],
    writer: W,
) -> PocketResult<()> {
    let names: HashMap<CategoryId, &str> =
        categories.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["ID", "Date", "Type", "Category", "Amount", "Note"])?;

    for txn in transactions {
        wtr.write_record([
            txn.id.as_uuid().to_string(),
            txn.date.to_string(),
            txn.kind.to_string(),
            names
                .get(&txn.category_id)
                .copied()
                .unwrap_or(UNCATEGORIZED)
                .to_string(),
            amount(txn.amount),
            txn.note.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
