//! Goal collection (`goals.json`)

use std::cmp::Ordering;

use crate::audit::EntityType;
use crate::models::{Goal, GoalId};

use super::repository::{JsonRepository, Record};

pub type GoalRepository = JsonRepository<Goal>;

impl Record for Goal {
    type Id = GoalId;
    const COLLECTION: &'static str = "goals";
    const ENTITY: EntityType = EntityType::Goal;

    fn id(&self) -> GoalId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }

    /// Nearest deadline first, goals without one last
    fn order(&self, other: &Self) -> Ordering {
        match (self.deadline, other.deadline) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.created_at.cmp(&other.created_at))
    }
}
