//! Budget collection (`budgets.json`)

use std::cmp::Ordering;

use crate::audit::EntityType;
use crate::models::{Budget, BudgetId};

use super::repository::{JsonRepository, Record};

pub type BudgetRepository = JsonRepository<Budget>;

impl Record for Budget {
    type Id = BudgetId;
    const COLLECTION: &'static str = "budgets";
    const ENTITY: EntityType = EntityType::Budget;

    fn id(&self) -> BudgetId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }

    /// Oldest first
    fn order(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.name.cmp(&other.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_keeps_threshold() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        let budget = Budget::new(
            "Weekly Groceries",
            None,
            Money::from_major(700_000),
            BudgetPeriod::Weekly,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .with_alert_threshold(0.9);
        repo.upsert(budget.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = BudgetRepository::new(repo.path().clone());
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_all().unwrap(), vec![budget]);
    }
}
