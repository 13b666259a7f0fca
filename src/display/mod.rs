//! Display formatting for terminal output
//!
//! Currency and number formatting driven by user settings, `tabled` list
//! views and the dashboard text layout.

pub mod dashboard;
pub mod format;
pub mod tables;

pub use dashboard::{format_dashboard, format_trend_chart};
pub use format::{format_compact, format_percentage, progress_bar, CurrencyFormat};
pub use tables::{
    budget_table, category_table, goal_table, spending_table, trend_table, transaction_table,
};
