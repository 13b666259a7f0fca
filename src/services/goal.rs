//! Goal service
//!
//! Savings goals: creation, contributions and projection.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::{PocketError, PocketResult};
use crate::models::{Goal, GoalId, Money};
use crate::reports::{goal_status, GoalStatus};
use crate::storage::Storage;

/// Service for goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

/// Fields to change on an existing goal; `None` leaves a field as is.
///
/// `deadline: Some(None)` and `interest_rate: Some(None)` clear the field.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalInput {
    pub name: Option<String>,
    pub target: Option<Money>,
    pub current: Option<Money>,
    pub deadline: Option<Option<NaiveDate>>,
    pub interest_rate: Option<Option<f64>>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl UpdateGoalInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target.is_none()
            && self.current.is_none()
            && self.deadline.is_none()
            && self.interest_rate.is_none()
            && self.icon.is_none()
            && self.color.is_none()
    }
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Store a new goal
    pub fn create(&self, goal: Goal) -> PocketResult<Goal> {
        goal.validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;
        self.storage.log_create(&goal)?;

        info!(id = %goal.id, name = %goal.name, target = %goal.target, "created goal");
        Ok(goal)
    }

    pub fn get(&self, id: GoalId) -> PocketResult<Option<Goal>> {
        self.storage.goals.get(id)
    }

    /// Find a goal by name (case-insensitive) or id reference
    pub fn find(&self, reference: &str) -> PocketResult<Option<Goal>> {
        let name = reference.trim().to_lowercase();
        if let Some(goal) = self
            .storage
            .goals
            .find(|g| g.name.to_lowercase() == name || g.id.matches_ref(reference))?
            .into_iter()
            .next()
        {
            return Ok(Some(goal));
        }
        match reference.parse::<GoalId>() {
            Ok(id) => self.storage.goals.get(id),
            Err(_) => Ok(None),
        }
    }

    /// Goals, nearest deadline first
    pub fn list(&self) -> PocketResult<Vec<Goal>> {
        self.storage.goals.get_all()
    }

    /// Add money to a goal's saved balance
    pub fn contribute(&self, id: GoalId, amount: Money) -> PocketResult<Goal> {
        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| PocketError::goal_not_found(id.to_string()))?;
        let before = goal.clone();

        goal.contribute(amount)
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;
        self.storage.log_update(&before, &goal)?;

        info!(id = %goal.id, amount = %amount, current = %goal.current, "contributed to goal");
        Ok(goal)
    }

    /// Update a goal's definition
    pub fn update(&self, id: GoalId, input: UpdateGoalInput) -> PocketResult<Goal> {
        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| PocketError::goal_not_found(id.to_string()))?;
        let before = goal.clone();

        if let Some(name) = input.name {
            goal.name = name.trim().to_string();
        }
        if let Some(target) = input.target {
            goal.target = target;
        }
        if let Some(current) = input.current {
            goal.current = current;
        }
        if let Some(deadline) = input.deadline {
            goal.deadline = deadline;
        }
        if let Some(rate) = input.interest_rate {
            goal.interest_rate = rate;
        }
        if let Some(icon) = input.icon {
            goal.icon = icon;
        }
        if let Some(color) = input.color {
            goal.color = color;
        }
        goal.updated_at = Utc::now();

        goal.validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;
        self.storage.log_update(&before, &goal)?;

        info!(id = %goal.id, name = %goal.name, target = %goal.target, "updated goal");
        Ok(goal)
    }

    /// Delete a goal
    pub fn delete(&self, id: GoalId) -> PocketResult<Goal> {
        let goal = self
            .storage
            .goals
            .delete(id)?
            .ok_or_else(|| PocketError::goal_not_found(id.to_string()))?;

        self.storage.goals.save()?;
        self.storage.log_delete(&goal)?;

        info!(id = %goal.id, name = %goal.name, "deleted goal");
        Ok(goal)
    }

    /// Status bundle for one goal
    pub fn status(
        &self,
        id: GoalId,
        monthly_contribution: Option<Money>,
        as_of: NaiveDate,
    ) -> PocketResult<GoalStatus> {
        let goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| PocketError::goal_not_found(id.to_string()))?;
        goal_status(&goal, monthly_contribution, as_of)
    }
}
