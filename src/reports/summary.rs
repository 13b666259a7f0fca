//! Income / expense summary
//!
//! Totals income and expenses over a transaction set, optionally restricted
//! to a date range, and derives the month-by-month trend used by the
//! dashboard chart.

use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{DateRange, Money, Transaction, TransactionType};

/// Income, expenses and balance over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FinancialSummary {
    pub income: Money,
    pub expenses: Money,
    /// income - expenses; negative when spending outruns income
    pub balance: Money,
}

impl FinancialSummary {
    /// Savings rate as a percentage of income, 0 when there is no income
    pub fn savings_rate(&self) -> f64 {
        if self.income.is_zero() {
            return 0.0;
        }
        self.balance.minor() as f64 / self.income.minor() as f64 * 100.0
    }
}

/// Summarize transactions, counting only those dated inside `range` when one
/// is given.
pub fn summarize(transactions: &[Transaction], range: Option<&DateRange>) -> FinancialSummary {
    let mut income = Money::zero();
    let mut expenses = Money::zero();
    let mut counted = 0usize;

    for txn in transactions
        .iter()
        .filter(|t| range.map_or(true, |r| r.contains(t.date)))
    {
        match txn.kind {
            TransactionType::Income => income += txn.amount,
            TransactionType::Expense => expenses += txn.amount,
        }
        counted += 1;
    }

    debug!(
        counted,
        total = transactions.len(),
        range = ?range.map(|r| r.to_string()),
        "summarized transactions"
    );

    FinancialSummary {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Relative change from `previous` to `current` in percent.
///
/// Defined as 0 when there is no previous value to compare against.
pub fn percentage_change(previous: Money, current: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    (current.minor() - previous.minor()) as f64 / previous.minor() as f64 * 100.0
}

/// One calendar month of the trend chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    /// First day of the month
    pub month: NaiveDate,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

impl MonthlyTotals {
    /// "Jan", "Feb", ...
    pub fn label(&self) -> String {
        self.month.format("%b").to_string()
    }
}

/// Totals for `months` consecutive calendar months ending with the month
/// containing `last_month`, oldest first. Months without activity are
/// included with zero totals.
pub fn monthly_trend(
    transactions: &[Transaction],
    last_month: NaiveDate,
    months: usize,
) -> Vec<MonthlyTotals> {
    let last = DateRange::month_of(last_month).start;

    (0..months)
        .rev()
        .filter_map(|back| last.checked_sub_months(Months::new(back as u32)))
        .map(|month| {
            let summary = summarize(transactions, Some(&DateRange::month_of(month)));
            MonthlyTotals {
                month,
                income: summary.income,
                expenses: summary.expenses,
                net: summary.balance,
            }
        })
        .collect()
}

/// Group transactions by date, newest day first. Within a day the input
/// order is kept.
pub fn group_by_date(transactions: &[Transaction]) -> Vec<(NaiveDate, Vec<&Transaction>)> {
    let mut days: BTreeMap<NaiveDate, Vec<&Transaction>> = BTreeMap::new();
    for txn in transactions {
        days.entry(txn.date).or_default().push(txn);
    }
    days.into_iter().rev().collect()
}

/// The `limit` most recent transactions, newest first.
///
/// Ties on date fall back to creation time so the order is deterministic.
pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    sorted.truncate(limit);
    sorted
}
