//! Table views for list commands

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Category, CategoryId, Transaction};
use crate::reports::spending::UNCATEGORIZED;
use crate::reports::{BudgetOverview, CategorySpend, GoalStatus, MonthlyTotals};

use super::format::{format_percentage, progress_bar, truncate, CurrencyFormat};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Custom")]
    custom: String,
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Budget")]
    name: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Saved")]
    current: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Per month")]
    required: String,
    #[tabled(rename = "Months")]
    months: String,
}

#[derive(Tabled)]
struct SpendRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Txns")]
    count: usize,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net")]
    net: String,
}

fn render<T: Tabled>(rows: Vec<T>, right_aligned: &[usize]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    for &col in right_aligned {
        table.with(Modify::new(Columns::single(col)).with(Alignment::right()));
    }
    table.to_string()
}

/// Transactions with their category names, signed amounts
pub fn transaction_table(
    transactions: &[Transaction],
    categories: &[Category],
    fmt: &CurrencyFormat,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let names: HashMap<CategoryId, &str> =
        categories.iter().map(|c| (c.id, c.name.as_str())).collect();

    let rows = transactions
        .iter()
        .map(|t| TransactionRow {
            id: t.id.to_string(),
            date: t.date.format("%Y-%m-%d").to_string(),
            category: names
                .get(&t.category_id)
                .copied()
                .unwrap_or(UNCATEGORIZED)
                .to_string(),
            amount: fmt.format_signed(t.signed_amount()),
            note: truncate(t.note.as_deref().unwrap_or(""), 30),
        })
        .collect();

    render(rows, &[3])
}

pub fn category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found. Run 'pocketwise init' to create the defaults.".to_string();
    }

    let rows = categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            kind: c.kind.to_string(),
            icon: c.icon.clone(),
            color: c.color.clone(),
            custom: if c.is_custom { "yes" } else { "" }.to_string(),
        })
        .collect();

    render(rows, &[])
}

/// Budget progress rows followed by the overview totals
pub fn budget_table(overview: &BudgetOverview, fmt: &CurrencyFormat) -> String {
    if overview.budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = overview
        .budgets
        .iter()
        .map(|p| BudgetRow {
            name: if p.expired {
                format!("{} (ended)", p.name)
            } else {
                p.name.clone()
            },
            period: p.window.to_string(),
            spent: fmt.format(p.spent),
            limit: fmt.format(p.limit),
            remaining: fmt.format(p.remaining),
            progress: format!(
                "{} {}",
                progress_bar(p.ratio, 10),
                format_percentage(p.percentage_rounded(), 1)
            ),
            status: p.status.to_string(),
        })
        .collect();

    format!(
        "{}\nTotal spent {} of {} ({} left)",
        render(rows, &[2, 3, 4]),
        fmt.format(overview.total_spent),
        fmt.format(overview.total_limit),
        fmt.format(overview.total_remaining)
    )
}

pub fn goal_table(goals: &[GoalStatus], fmt: &CurrencyFormat) -> String {
    if goals.is_empty() {
        return "No goals found.".to_string();
    }

    let rows = goals
        .iter()
        .map(|g| GoalRow {
            name: g.name.clone(),
            current: fmt.format(g.current),
            target: fmt.format(g.target),
            progress: format!(
                "{} {}",
                progress_bar(g.progress, 10),
                format_percentage(g.progress * 100.0, 0)
            ),
            deadline: g
                .deadline
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            required: g.required_monthly.map(|m| fmt.format(m)).unwrap_or_default(),
            months: g
                .months_to_goal
                .map(|m| m.to_string())
                .unwrap_or_default(),
        })
        .collect();

    render(rows, &[1, 2, 5])
}

pub fn spending_table(spends: &[CategorySpend], fmt: &CurrencyFormat) -> String {
    if spends.is_empty() {
        return "No spending in this range.".to_string();
    }

    let rows = spends
        .iter()
        .map(|s| SpendRow {
            name: s.name.clone(),
            amount: fmt.format(s.amount),
            share: format_percentage(s.percentage, 1),
            count: s.transaction_count,
        })
        .collect();

    render(rows, &[1, 2, 3])
}

pub fn trend_table(trend: &[MonthlyTotals], fmt: &CurrencyFormat) -> String {
    let rows = trend
        .iter()
        .map(|m| TrendRow {
            month: m.month.format("%b %Y").to_string(),
            income: fmt.format(m.income),
            expenses: fmt.format(m.expenses),
            net: fmt.format(m.net),
        })
        .collect();

    render(rows, &[1, 2, 3])
}
