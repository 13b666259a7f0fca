//! Export module for Pocketwise
//!
//! CSV export of report tables and the transaction list.

pub mod csv;

pub use self::csv::{
    export_budgets_csv, export_spending_csv, export_transactions_csv, export_trend_csv,
};
