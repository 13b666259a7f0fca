//! Budget progress
//!
//! Measures how much of a budget's limit has been consumed in its active
//! period window and classifies the result into safe / warning / exceeded.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::{PocketError, PocketResult};
use crate::models::{Budget, BudgetId, CategoryId, DateRange, Money, Transaction};

/// Consumption tier of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Safe,
    Warning,
    Exceeded,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Warning => write!(f, "warning"),
            Self::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// Progress of one budget through its active window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub budget_id: BudgetId,
    pub name: String,
    pub category_id: Option<CategoryId>,
    pub window: DateRange,
    pub spent: Money,
    pub limit: Money,
    /// spent / limit as a percentage, clamped to 0..=100
    pub percentage: f64,
    /// spent / limit, unclamped
    pub ratio: f64,
    /// limit - spent, floored at zero
    pub remaining: Money,
    pub status: BudgetStatus,
    /// The budget's end date lies before the as-of date
    pub expired: bool,
}

impl BudgetProgress {
    /// Percentage rounded to one decimal, as shown to the user
    pub fn percentage_rounded(&self) -> f64 {
        (self.percentage * 10.0).round() / 10.0
    }

    /// Amount spent beyond the limit, zero when within it
    pub fn overspent(&self) -> Money {
        self.spent.saturating_sub_floor_zero(self.limit)
    }
}

/// Compute a budget's progress as of a date.
///
/// The anchor date is `as_of` clamped into the budget's own
/// `[start_date, end_date]` span; the active window is the period window
/// around the anchor, cut to that span. Only expenses in the budget's
/// category (any category for a wallet-wide budget) count.
pub fn compute_progress(
    budget: &Budget,
    transactions: &[Transaction],
    as_of: NaiveDate,
    week_start: Weekday,
) -> PocketResult<BudgetProgress> {
    budget
        .validate_terms()
        .map_err(|e| PocketError::Validation(e.to_string()))?;

    let expired = budget.is_expired(as_of);
    let anchor = anchor_date(budget, as_of);
    let window = active_window(budget, anchor, week_start);

    let spent: Money = transactions
        .iter()
        .filter(|t| t.is_expense())
        .filter(|t| budget.category_id.map_or(true, |c| t.category_id == c))
        .filter(|t| window.contains(t.date))
        .map(|t| t.amount)
        .sum();

    let (ratio, status) = if budget.limit.is_zero() {
        if !spent.is_zero() {
            return Err(PocketError::Domain(format!(
                "Budget '{}' has a zero limit but {} was spent",
                budget.name, spent
            )));
        }
        (0.0, BudgetStatus::Safe)
    } else {
        let ratio = spent.minor() as f64 / budget.limit.minor() as f64;
        let status = if spent >= budget.limit {
            BudgetStatus::Exceeded
        } else if ratio >= budget.alert_threshold {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Safe
        };
        (ratio, status)
    };

    debug!(
        budget = %budget.name,
        window = %window,
        spent = %spent,
        %status,
        expired,
        "computed budget progress"
    );

    Ok(BudgetProgress {
        budget_id: budget.id,
        name: budget.name.clone(),
        category_id: budget.category_id,
        window,
        spent,
        limit: budget.limit,
        percentage: (ratio * 100.0).min(100.0),
        ratio,
        remaining: budget.limit.saturating_sub_floor_zero(spent),
        status,
        expired,
    })
}

fn anchor_date(budget: &Budget, as_of: NaiveDate) -> NaiveDate {
    let anchor = as_of.max(budget.start_date);
    match budget.end_date {
        Some(end) => anchor.min(end),
        None => anchor,
    }
}

fn active_window(budget: &Budget, anchor: NaiveDate, week_start: Weekday) -> DateRange {
    let window = budget.period.window(anchor, week_start);
    let span = DateRange {
        start: budget.start_date,
        end: budget.end_date.unwrap_or(window.end.max(budget.start_date)),
    };
    // The anchor lies in both ranges, so the overlap is never empty
    window.intersect(&span).unwrap_or(window)
}

/// Progress of every budget plus the totals shown above the budget list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    pub budgets: Vec<BudgetProgress>,
    pub total_limit: Money,
    pub total_spent: Money,
    /// total_limit - total_spent, floored at zero
    pub total_remaining: Money,
}

impl BudgetOverview {
    /// Number of budgets in the given tier
    pub fn count(&self, status: BudgetStatus) -> usize {
        self.budgets.iter().filter(|b| b.status == status).count()
    }

    /// Budgets that need attention, exceeded first
    pub fn alerts(&self) -> Vec<&BudgetProgress> {
        let mut alerts: Vec<&BudgetProgress> = self
            .budgets
            .iter()
            .filter(|b| b.status != BudgetStatus::Safe)
            .collect();
        alerts.sort_by_key(|b| b.status != BudgetStatus::Exceeded);
        alerts
    }
}

/// Compute progress for every budget. Fails on the first budget that
/// cannot be evaluated.
pub fn compute_overview(
    budgets: &[Budget],
    transactions: &[Transaction],
    as_of: NaiveDate,
    week_start: Weekday,
) -> PocketResult<BudgetOverview> {
    let progress = budgets
        .iter()
        .map(|b| compute_progress(b, transactions, as_of, week_start))
        .collect::<PocketResult<Vec<_>>>()?;

    let total_limit: Money = progress.iter().map(|p| p.limit).sum();
    let total_spent: Money = progress.iter().map(|p| p.spent).sum();

    Ok(BudgetOverview {
        budgets: progress,
        total_limit,
        total_spent,
        total_remaining: total_limit.saturating_sub_floor_zero(total_spent),
    })
}
