//! Goal progress and time-to-goal projections
//!
//! Without interest the projection is a straight division. With a monthly
//! rate `r` and contribution `c`, the balance after `n` months is the future
//! value of an annuity, which solves to
//!
//! ```text
//! n = ln((target*r + c) / (current*r + c)) / ln(1 + r)
//! ```
//!
//! Inputs for which that expression has no finite real answer are reported
//! as domain errors.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::{PocketError, PocketResult};
use crate::models::{Goal, GoalId, Money};

/// Projected time to reach a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthsToGoal {
    Months(u32),
    /// No positive contribution, so the target is never reached
    Unreachable,
}

impl MonthsToGoal {
    pub fn months(&self) -> Option<u32> {
        match self {
            Self::Months(n) => Some(*n),
            Self::Unreachable => None,
        }
    }
}

impl fmt::Display for MonthsToGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Months(1) => write!(f, "1 month"),
            Self::Months(n) => write!(f, "{} months", n),
            Self::Unreachable => write!(f, "N/A"),
        }
    }
}

fn checked_goal(goal: &Goal) -> PocketResult<()> {
    goal.validate()
        .map_err(|e| PocketError::Validation(e.to_string()))
}

/// Fraction of the target saved so far, capped at 1
pub fn progress(goal: &Goal) -> PocketResult<f64> {
    checked_goal(goal)?;
    let fraction = goal.current.minor() as f64 / goal.target.minor() as f64;
    Ok(fraction.min(1.0))
}

/// Months of `monthly_contribution` needed to reach the goal, with interest
/// compounding monthly at the goal's rate when one is set.
pub fn months_to_completion(goal: &Goal, monthly_contribution: Money) -> PocketResult<MonthsToGoal> {
    checked_goal(goal)?;

    if !monthly_contribution.is_positive() {
        return Ok(MonthsToGoal::Unreachable);
    }

    if goal.is_reached() {
        return Ok(MonthsToGoal::Months(0));
    }

    let rate = goal.interest_rate.unwrap_or(0.0);
    let months = if rate == 0.0 {
        let remaining = goal.remaining().minor();
        let contribution = monthly_contribution.minor();
        to_months(remaining / contribution + i64::from(remaining % contribution != 0))?
    } else {
        months_with_interest(goal, monthly_contribution, rate)?
    };

    debug!(goal = %goal.name, months, rate, "projected months to goal");
    Ok(MonthsToGoal::Months(months))
}

fn months_with_interest(goal: &Goal, contribution: Money, annual_rate: f64) -> PocketResult<u32> {
    let r = annual_rate / 12.0 / 100.0;
    let c = contribution.as_major_f64();
    let numerator = goal.target.as_major_f64() * r + c;
    let denominator = goal.current.as_major_f64() * r + c;

    if numerator <= 0.0 || denominator <= 0.0 {
        return Err(PocketError::Domain(format!(
            "Goal '{}' cannot be reached at {}% with {} per month",
            goal.name, annual_rate, contribution
        )));
    }
    if 1.0 + r <= 0.0 {
        return Err(PocketError::Domain(format!(
            "Interest rate {}% wipes out the balance every month",
            annual_rate
        )));
    }

    let months = ((numerator / denominator).ln() / (1.0 + r).ln()).ceil();
    if !months.is_finite() || months < 0.0 {
        return Err(PocketError::Domain(format!(
            "No finite projection for goal '{}' at {}%",
            goal.name, annual_rate
        )));
    }
    to_months_f64(months)
}

fn to_months(months: i64) -> PocketResult<u32> {
    u32::try_from(months)
        .map_err(|_| PocketError::Domain(format!("Projection of {} months is out of range", months)))
}

fn to_months_f64(months: f64) -> PocketResult<u32> {
    if months > u32::MAX as f64 {
        return Err(PocketError::Domain(format!(
            "Projection of {} months is out of range",
            months
        )));
    }
    Ok(months as u32)
}

/// Future value of `principal` at an annual percentage rate compounded
/// `compounding_per_year` times for `years` years.
///
/// Zero compounding periods leave the principal unchanged.
pub fn compound_interest(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    compounding_per_year: u32,
) -> f64 {
    if compounding_per_year == 0 {
        return principal;
    }
    let n = compounding_per_year as f64;
    principal * (1.0 + annual_rate_percent / (n * 100.0)).powf(n * years)
}

/// Whole calendar months from `as_of` until `deadline`, zero once the
/// deadline has passed.
pub fn months_until(as_of: NaiveDate, deadline: NaiveDate) -> u32 {
    let mut months = (deadline.year() - as_of.year()) * 12 + deadline.month() as i32
        - as_of.month() as i32;
    if deadline.day() < as_of.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Even monthly amount that reaches the goal by its deadline.
///
/// None when the goal has no deadline. Once fewer than one whole month is
/// left the full remainder is due.
pub fn required_monthly_contribution(goal: &Goal, as_of: NaiveDate) -> PocketResult<Option<Money>> {
    checked_goal(goal)?;

    let Some(deadline) = goal.deadline else {
        return Ok(None);
    };

    let remaining = goal.remaining();
    let months = months_until(as_of, deadline) as i64;
    if months == 0 || remaining.is_zero() {
        return Ok(Some(remaining));
    }

    let per_month = (remaining.minor() + months - 1) / months;
    Ok(Some(Money::from_minor(per_month)))
}

/// Balance after `years` of compounding at the goal's rate with no further
/// contributions
pub fn project_balance(goal: &Goal, years: f64, compounding_per_year: u32) -> PocketResult<Money> {
    checked_goal(goal)?;
    let rate = goal.interest_rate.unwrap_or(0.0);
    let value = compound_interest(goal.current.as_major_f64(), rate, years, compounding_per_year);
    if !value.is_finite() {
        return Err(PocketError::Domain(format!(
            "Balance projection for goal '{}' is not finite",
            goal.name
        )));
    }
    Ok(Money::from_major_f64(value))
}

/// Everything the goals list shows for one goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalStatus {
    pub goal_id: GoalId,
    pub name: String,
    pub target: Money,
    pub current: Money,
    pub remaining: Money,
    /// 0..=1
    pub progress: f64,
    pub reached: bool,
    pub deadline: Option<NaiveDate>,
    /// Set when a monthly contribution was supplied
    pub months_to_goal: Option<MonthsToGoal>,
    /// Set when the goal has a deadline
    pub required_monthly: Option<Money>,
}

/// Build the status bundle for a goal
pub fn goal_status(
    goal: &Goal,
    monthly_contribution: Option<Money>,
    as_of: NaiveDate,
) -> PocketResult<GoalStatus> {
    let months_to_goal = monthly_contribution
        .map(|c| months_to_completion(goal, c))
        .transpose()?;

    Ok(GoalStatus {
        goal_id: goal.id,
        name: goal.name.clone(),
        target: goal.target,
        current: goal.current,
        remaining: goal.remaining(),
        progress: progress(goal)?,
        reached: goal.is_reached(),
        deadline: goal.deadline,
        months_to_goal,
        required_monthly: required_monthly_contribution(goal, as_of)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn emergency_fund() -> Goal {
        Goal::new("Emergency Fund", Money::from_major(50_000_000))
            .with_current(Money::from_major(15_000_000))
    }

    #[test]
    fn test_progress() {
        assert_eq!(progress(&emergency_fund()).unwrap(), 0.3);

        let over = Goal::new("Done", Money::from_major(10)).with_current(Money::from_major(15));
        assert_eq!(progress(&over).unwrap(), 1.0);

        let bad = Goal::new("Bad", Money::zero());
        assert!(progress(&bad).unwrap_err().is_validation());
    }

    #[test]
    fn test_months_without_interest() {
        let goal = Goal::new("Laptop", Money::from_major(1_200_000));
        assert_eq!(
            months_to_completion(&goal, Money::from_major(100_000)).unwrap(),
            MonthsToGoal::Months(12)
        );
        // Partial final month rounds up
        assert_eq!(
            months_to_completion(&goal, Money::from_major(110_000)).unwrap(),
            MonthsToGoal::Months(11)
        );
    }

    #[test]
    fn test_huge_contribution_takes_one_month() {
        let goal = Goal::new("G", Money::from_major(1000));
        assert_eq!(
            months_to_completion(&goal, Money::from_minor(i64::MAX)).unwrap(),
            MonthsToGoal::Months(1)
        );
        let goal = Goal::new("G", Money::MAX).with_current(Money::from_minor(1));
        assert_eq!(
            months_to_completion(&goal, Money::MAX).unwrap(),
            MonthsToGoal::Months(1)
        );
    }

    #[test]
    fn test_zero_contribution_is_unreachable() {
        let goal = emergency_fund();
        let months = months_to_completion(&goal, Money::zero()).unwrap();
        assert_eq!(months, MonthsToGoal::Unreachable);
        assert_eq!(months.to_string(), "N/A");
        assert_eq!(months.months(), None);

        assert_eq!(
            months_to_completion(&goal, Money::from_major(-5)).unwrap(),
            MonthsToGoal::Unreachable
        );
    }

    #[test]
    fn test_reached_goal_needs_no_months() {
        let goal = Goal::new("Done", Money::from_major(10))
            .with_current(Money::from_major(10))
            .with_interest_rate(5.0);
        assert_eq!(
            months_to_completion(&goal, Money::from_major(1)).unwrap(),
            MonthsToGoal::Months(0)
        );
    }

    #[test]
    fn test_months_with_interest() {
        let goal = Goal::new("House", Money::from_major(1_200_000)).with_interest_rate(12.0);
        let months = months_to_completion(&goal, Money::from_major(100_000))
            .unwrap()
            .months()
            .unwrap();
        // 1% monthly: ln(1.12) / ln(1.01) = 11.39
        assert_eq!(months, 12);

        let with_balance = goal.clone().with_current(Money::from_major(600_000));
        let faster = months_to_completion(&with_balance, Money::from_major(100_000))
            .unwrap()
            .months()
            .unwrap();
        assert!(faster < months);
    }

    #[test]
    fn test_interest_domain_errors() {
        // -120% a year: the balance term goes negative
        let goal = Goal::new("Leaky", Money::from_major(2_000_000))
            .with_current(Money::from_major(1_000_000))
            .with_interest_rate(-120.0);
        let err = months_to_completion(&goal, Money::from_major(50_000)).unwrap_err();
        assert!(err.is_domain());

        let wiped = Goal::new("Wiped", Money::from_major(100)).with_interest_rate(-1200.0);
        assert!(months_to_completion(&wiped, Money::from_major(1))
            .unwrap_err()
            .is_domain());
    }

    #[test]
    fn test_compound_interest() {
        let value = compound_interest(1_000.0, 12.0, 1.0, 12);
        assert!((value - 1_126.825).abs() < 0.001);
        assert_eq!(compound_interest(1_000.0, 0.0, 5.0, 12), 1_000.0);
        assert_eq!(compound_interest(1_000.0, 10.0, 5.0, 0), 1_000.0);
    }

    #[test]
    fn test_months_until() {
        assert_eq!(months_until(date(2025, 1, 15), date(2025, 12, 15)), 11);
        assert_eq!(months_until(date(2025, 1, 15), date(2025, 12, 14)), 10);
        assert_eq!(months_until(date(2025, 1, 15), date(2025, 1, 31)), 0);
        assert_eq!(months_until(date(2025, 6, 1), date(2025, 1, 1)), 0);
    }

    #[test]
    fn test_required_monthly_contribution() {
        let goal = emergency_fund();
        assert_eq!(required_monthly_contribution(&goal, date(2025, 1, 1)).unwrap(), None);

        let goal = goal.with_deadline(date(2025, 8, 1));
        assert_eq!(
            required_monthly_contribution(&goal, date(2025, 1, 1)).unwrap(),
            Some(Money::from_major(5_000_000))
        );
        assert_eq!(
            required_monthly_contribution(&goal, date(2025, 7, 20)).unwrap(),
            Some(Money::from_major(35_000_000))
        );
    }

    #[test]
    fn test_project_balance() {
        let goal = Goal::new("Savings", Money::from_major(10_000))
            .with_current(Money::from_major(1_000))
            .with_interest_rate(12.0);
        let balance = project_balance(&goal, 1.0, 12).unwrap();
        assert_eq!(balance, Money::from_minor(112_683));

        let flat = Goal::new("Flat", Money::from_major(10)).with_current(Money::from_major(5));
        assert_eq!(project_balance(&flat, 3.0, 12).unwrap(), Money::from_major(5));
    }

    #[test]
    fn test_goal_status() {
        let goal = emergency_fund().with_deadline(date(2025, 8, 1));
        let status = goal_status(&goal, Some(Money::from_major(5_000_000)), date(2025, 1, 1)).unwrap();
        assert_eq!(status.progress, 0.3);
        assert_eq!(status.remaining, Money::from_major(35_000_000));
        assert_eq!(status.months_to_goal, Some(MonthsToGoal::Months(7)));
        assert_eq!(status.required_monthly, Some(Money::from_major(5_000_000)));
        assert!(!status.reached);

        let status = goal_status(&goal, None, date(2025, 1, 1)).unwrap();
        assert_eq!(status.months_to_goal, None);
    }
}
