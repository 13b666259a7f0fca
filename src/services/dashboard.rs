//! Dashboard assembly
//!
//! Pulls records from any [`Ledger`] and runs them through the aggregation
//! core to build everything the home screen shows for one month.

use chrono::{Days, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::error::PocketResult;
use crate::models::{DateRange, Transaction, TransactionFilter};
use crate::reports::{
    compute_overview, goal_status, monthly_trend, percentage_change, recent, spend_by_category,
    summarize, top_categories, BudgetOverview, CategorySpend, FinancialSummary, GoalStatus,
    MonthlyTotals,
};
use crate::storage::Ledger;

/// Months shown in the trend chart
pub const TREND_MONTHS: usize = 6;

/// Knobs for building a dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// The day the dashboard is built for; its month is the reporting range
    pub as_of: NaiveDate,
    pub week_start: Weekday,
    pub recent_limit: usize,
    pub top_n: usize,
    pub trend_months: usize,
}

impl DashboardOptions {
    pub fn from_settings(settings: &Settings, as_of: NaiveDate) -> Self {
        Self {
            as_of,
            week_start: settings.week_start(),
            recent_limit: settings.recent_transactions_limit,
            top_n: settings.chart_top_n,
            trend_months: TREND_MONTHS,
        }
    }
}

/// Everything the home screen renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub range: DateRange,
    pub summary: FinancialSummary,
    pub previous: FinancialSummary,
    /// Percent change in income against the previous month
    pub income_change: f64,
    /// Percent change in expenses against the previous month
    pub expense_change: f64,
    pub spending: Vec<CategorySpend>,
    pub budgets: BudgetOverview,
    pub goals: Vec<GoalStatus>,
    pub recent: Vec<Transaction>,
    pub trend: Vec<MonthlyTotals>,
}

/// Builds dashboards from a ledger
pub struct DashboardService<'a, L: Ledger> {
    ledger: &'a L,
}

impl<'a, L: Ledger> DashboardService<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// Build the dashboard for the month containing `options.as_of`
    pub fn build(&self, options: &DashboardOptions) -> PocketResult<Dashboard> {
        let transactions = self.ledger.list_transactions(&TransactionFilter::all())?;
        let categories = self.ledger.list_categories()?;
        let budgets = self.ledger.list_budgets()?;
        let goals = self.ledger.list_goals()?;

        let range = DateRange::month_of(options.as_of);
        let previous_range = range
            .start
            .checked_sub_days(Days::new(1))
            .map(DateRange::month_of);

        let summary = summarize(&transactions, Some(&range));
        let previous = previous_range
            .map(|r| summarize(&transactions, Some(&r)))
            .unwrap_or_default();

        let in_range: Vec<Transaction> = transactions
            .iter()
            .filter(|t| range.contains(t.date))
            .cloned()
            .collect();
        let spending = top_categories(&spend_by_category(&in_range, &categories), options.top_n);

        let budget_overview =
            compute_overview(&budgets, &transactions, options.as_of, options.week_start)?;

        let goal_statuses = goals
            .iter()
            .map(|g| goal_status(g, None, options.as_of))
            .collect::<PocketResult<Vec<_>>>()?;

        let recent_txns = recent(&transactions, options.recent_limit)
            .into_iter()
            .cloned()
            .collect();

        debug!(
            range = %range,
            transactions = transactions.len(),
            budgets = budgets.len(),
            goals = goals.len(),
            "built dashboard"
        );

        Ok(Dashboard {
            range,
            income_change: percentage_change(previous.income, summary.income),
            expense_change: percentage_change(previous.expenses, summary.expenses),
            summary,
            previous,
            spending,
            budgets: budget_overview,
            goals: goal_statuses,
            recent: recent_txns,
            trend: monthly_trend(&transactions, options.as_of, options.trend_months),
        })
    }
}
