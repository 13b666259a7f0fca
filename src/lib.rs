//! Pocketwise - personal finance ledger
//!
//! This library provides the core functionality for the Pocketwise command
//! line application: a ledger of income and expense transactions filed under
//! categories, spending budgets over calendar periods, and savings goals.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data records (transactions, categories, budgets, goals)
//! - `reports`: Pure aggregation over records (summaries, spending by
//!   category, budget progress, goal projections)
//! - `storage`: JSON file storage and the `Ledger` read trait
//! - `services`: Validation, persistence and audit logging of changes
//! - `audit`: Append-only audit log
//! - `config`: Path resolution and user settings
//! - `display`: Terminal formatting
//! - `export`: CSV export
//! - `cli`: Command handlers behind the binary
//!
//! # Example
//!
//! ```rust
//! use chrono::{NaiveDate, Weekday};
//! use pocketwise::models::{Budget, BudgetPeriod, CategoryId, Money, Transaction};
//! use pocketwise::reports::{compute_progress, BudgetStatus};
//!
//! let food = CategoryId::new();
//! let date = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();
//! let budget = Budget::new("Food", Some(food), Money::from_major(3_000_000),
//!     BudgetPeriod::Monthly, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
//! let spent = vec![Transaction::expense(food, Money::from_major(1_850_000), date)];
//!
//! let progress = compute_progress(&budget, &spent, date, Weekday::Mon).unwrap();
//! assert_eq!(progress.status, BudgetStatus::Safe);
//! assert_eq!(progress.percentage_rounded(), 61.7);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PocketError, PocketResult};
