//! Core data models for Pocketwise
//!
//! Plain records for the ledger: transactions, categories, budgets and
//! savings goals, plus the money, id and period value types they share.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetValidationError, DEFAULT_ALERT_THRESHOLD};
pub use category::{Category, CategoryKind, CategoryValidationError, DefaultCategory};
pub use goal::{Goal, GoalValidationError};
pub use ids::{BudgetId, CategoryId, GoalId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::{weekday_from_index, BudgetPeriod, DateRange, PeriodParseError};
pub use transaction::{
    Transaction, TransactionFilter, TransactionType, TransactionValidationError,
};
