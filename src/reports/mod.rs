//! Aggregation core
//!
//! Pure functions from plain ledger records to the derived figures the
//! dashboard, budget list and reports render: income/expense summaries,
//! per-category spending, budget consumption and goal projections. Nothing
//! here performs I/O or holds state between calls.

pub mod budget_progress;
pub mod goal_projection;
pub mod spending;
pub mod summary;

pub use budget_progress::{
    compute_overview, compute_progress, BudgetOverview, BudgetProgress, BudgetStatus,
};
pub use goal_projection::{
    compound_interest, goal_status, months_to_completion, months_until, progress,
    project_balance, required_monthly_contribution, GoalStatus, MonthsToGoal,
};
pub use spending::{income_by_category, spend_by_category, top_categories, CategorySpend};
pub use summary::{
    group_by_date, monthly_trend, percentage_change, recent, summarize, FinancialSummary,
    MonthlyTotals,
};
