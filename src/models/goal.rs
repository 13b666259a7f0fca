//! Savings goal model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Display name
    pub name: String,

    /// Amount to reach
    pub target: Money,

    /// Amount saved so far (may exceed the target)
    pub current: Money,

    /// Date the goal should be reached by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,

    /// Annual interest rate in percent earned on the saved balance.
    /// Negative rates model fees eroding the balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,

    #[serde(default = "default_icon")]
    pub icon: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// When the goal was created
    pub created_at: DateTime<Utc>,

    /// When the goal was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_icon() -> String {
    "flag-outline".to_string()
}

fn default_color() -> String {
    "#3B82F6".to_string()
}

impl Goal {
    /// Create a new goal with nothing saved yet
    pub fn new(name: impl Into<String>, target: Money) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            name: name.into(),
            target,
            current: Money::zero(),
            deadline: None,
            interest_rate: None,
            icon: default_icon(),
            color: default_color(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_current(mut self, current: Money) -> Self {
        self.current = current;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_interest_rate(mut self, annual_percent: f64) -> Self {
        self.interest_rate = Some(annual_percent);
        self
    }

    /// Amount still missing, floored at zero
    pub fn remaining(&self) -> Money {
        self.target.saturating_sub_floor_zero(self.current)
    }

    pub fn is_reached(&self) -> bool {
        self.current >= self.target
    }

    /// Add a contribution to the saved balance
    pub fn contribute(&mut self, amount: Money) -> Result<(), GoalValidationError> {
        if !amount.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution(amount));
        }
        let current = self.current + amount;
        if !current.is_within_limit() {
            return Err(GoalValidationError::AmountTooLarge(current));
        }
        self.current = current;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }

        if !self.target.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target));
        }

        if self.current.is_negative() {
            return Err(GoalValidationError::NegativeCurrent(self.current));
        }

        for amount in [self.target, self.current] {
            if !amount.is_within_limit() {
                return Err(GoalValidationError::AmountTooLarge(amount));
            }
        }

        if let Some(rate) = self.interest_rate {
            if !rate.is_finite() {
                return Err(GoalValidationError::InvalidInterestRate(rate));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} / {})", self.name, self.current, self.target)
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget(Money),
    NegativeCurrent(Money),
    AmountTooLarge(Money),
    InvalidInterestRate(f64),
    NonPositiveContribution(Money),
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget(t) => write!(f, "Goal target must be positive: {}", t),
            Self::NegativeCurrent(c) => write!(f, "Saved amount cannot be negative: {}", c),
            Self::AmountTooLarge(a) => {
                write!(f, "Goal amount {} exceeds the maximum of {}", a, Money::MAX)
            }
            Self::InvalidInterestRate(r) => {
                write!(f, "Interest rate must be a finite percentage, got {}", r)
            }
            Self::NonPositiveContribution(a) => {
                write!(f, "Contribution must be positive: {}", a)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}
