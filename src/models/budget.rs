//! Budget model
//!
//! A budget caps spending for one category (or the whole wallet when no
//! category is set) over a recurring calendar period.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::period::BudgetPeriod;

/// Fraction of the limit at which a budget switches to the warning tier
pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.8;

fn default_alert_threshold() -> f64 {
    DEFAULT_ALERT_THRESHOLD
}

/// A spending limit definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Category this budget tracks; None tracks every expense
    pub category_id: Option<CategoryId>,

    /// Display name
    pub name: String,

    /// Spending limit per period
    pub limit: Money,

    /// How often the limit resets
    pub period: BudgetPeriod,

    /// First day the budget applies
    pub start_date: NaiveDate,

    /// Last day the budget applies (open-ended when None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Fraction of the limit (0, 1] that triggers the warning tier
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget with the default alert threshold
    pub fn new(
        name: impl Into<String>,
        category_id: Option<CategoryId>,
        limit: Money,
        period: BudgetPeriod,
        start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            category_id,
            name: name.into(),
            limit,
            period,
            start_date,
            end_date: None,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the last day of the budget
    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Override the alert threshold
    pub fn with_alert_threshold(mut self, threshold: f64) -> Self {
        self.alert_threshold = threshold;
        self
    }

    /// Change the spending limit
    pub fn set_limit(&mut self, limit: Money) {
        self.limit = limit;
        self.updated_at = Utc::now();
    }

    /// Whether this budget tracks every expense rather than one category
    pub fn is_wallet_wide(&self) -> bool {
        self.category_id.is_none()
    }

    /// A budget whose end date has passed
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end < as_of)
    }

    /// Validate a budget before it is stored: on top of
    /// [`validate_terms`](Self::validate_terms), the limit must be positive.
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        self.validate_terms()?;
        if self.limit.is_zero() {
            return Err(BudgetValidationError::ZeroLimit);
        }
        Ok(())
    }

    /// Validate everything progress math depends on.
    ///
    /// A zero limit passes here; progress against it is only defined while
    /// nothing has been spent.
    pub fn validate_terms(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if self.limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit(self.limit));
        }

        if !self.limit.is_within_limit() {
            return Err(BudgetValidationError::LimitTooLarge(self.limit));
        }

        if !(self.alert_threshold > 0.0 && self.alert_threshold <= 1.0) {
            return Err(BudgetValidationError::ThresholdOutOfRange(self.alert_threshold));
        }

        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(BudgetValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.limit, self.period)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValidationError {
    EmptyName,
    NegativeLimit(Money),
    ZeroLimit,
    LimitTooLarge(Money),
    ThresholdOutOfRange(f64),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NegativeLimit(limit) => write!(f, "Budget limit cannot be negative: {}", limit),
            Self::ZeroLimit => write!(f, "Budget limit must be greater than zero"),
            Self::LimitTooLarge(limit) => {
                write!(f, "Budget limit {} exceeds the maximum of {}", limit, Money::MAX)
            }
            Self::ThresholdOutOfRange(t) => {
                write!(f, "Alert threshold must be in (0, 1], got {}", t)
            }
            Self::EndBeforeStart { start, end } => {
                write!(f, "Budget end date {} is before its start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
