//! Category collection (`categories.json`)

use std::cmp::Ordering;

use crate::audit::EntityType;
use crate::error::PocketResult;
use crate::models::{Category, CategoryId, CategoryKind};

use super::repository::{JsonRepository, Record};

pub type CategoryRepository = JsonRepository<Category>;

impl Record for Category {
    type Id = CategoryId;
    const COLLECTION: &'static str = "categories";
    const ENTITY: EntityType = EntityType::Category;

    fn id(&self) -> CategoryId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }

    /// Income categories first, then by name
    fn order(&self, other: &Self) -> Ordering {
        kind_rank(self.kind)
            .cmp(&kind_rank(other.kind))
            .then_with(|| self.name.to_lowercase().cmp(&other.name.to_lowercase()))
    }
}

fn kind_rank(kind: CategoryKind) -> u8 {
    match kind {
        CategoryKind::Income => 0,
        CategoryKind::Expense => 1,
        CategoryKind::Both => 2,
    }
}

impl JsonRepository<Category> {
    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> PocketResult<Option<Category>> {
        let name = name.trim().to_lowercase();
        Ok(self
            .find(|c| c.name.to_lowercase() == name)?
            .into_iter()
            .next())
    }
}
