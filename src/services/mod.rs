//! Service layer for Pocketwise
//!
//! The service layer provides business logic on top of the storage layer:
//! input validation, referential checks between records, persistence and
//! audit logging. Read-only aggregation lives in `reports`.

pub mod budget;
pub mod category;
pub mod dashboard;
pub mod goal;
pub mod transaction;

pub use budget::{BudgetService, UpdateBudgetInput};
pub use category::{CategoryService, UpdateCategoryInput};
pub use dashboard::{Dashboard, DashboardOptions, DashboardService};
pub use goal::{GoalService, UpdateGoalInput};
pub use transaction::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
