//! Category service
//!
//! Creates custom categories and guards deletion of categories that
//! transactions still reference.

use tracing::info;

use crate::error::{PocketError, PocketResult};
use crate::models::{Category, CategoryId, CategoryKind, TransactionFilter, TransactionType};
use crate::storage::Storage;

/// Fields to change on an existing category; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub kind: Option<CategoryKind>,
}

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a user-defined category
    pub fn create(
        &self,
        name: &str,
        kind: CategoryKind,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> PocketResult<Category> {
        let name = name.trim();

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(PocketError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = Category::custom(
            name,
            icon.unwrap_or("pricetag-outline"),
            color.unwrap_or("#6B7280"),
            kind,
        );
        category
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;
        self.storage.log_create(&category)?;

        info!(id = %category.id, name = %category.name, kind = %category.kind, "created category");
        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> PocketResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name (case-insensitive) or id reference
    pub fn find(&self, reference: &str) -> PocketResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(reference)? {
            return Ok(Some(category));
        }
        if let Ok(id) = reference.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }
        Ok(self
            .storage
            .categories
            .find(|c| c.id.matches_ref(reference))?
            .into_iter()
            .next())
    }

    /// Find a category or fail with a not-found error
    pub fn resolve(&self, reference: &str) -> PocketResult<Category> {
        self.find(reference)?
            .ok_or_else(|| PocketError::category_not_found(reference))
    }

    /// All categories, income first
    pub fn list(&self) -> PocketResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Categories usable for the given kind of entry
    pub fn list_for(&self, kind: TransactionType) -> PocketResult<Vec<Category>> {
        self.storage.categories.find(|c| c.kind.accepts(kind))
    }

    /// Update a category.
    ///
    /// The name must stay unique, and the kind cannot drop a transaction
    /// type that existing entries or budgets in the category rely on.
    pub fn update(&self, id: CategoryId, input: UpdateCategoryInput) -> PocketResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| PocketError::category_not_found(id.to_string()))?;
        let before = category.clone();

        if let Some(name) = input.name {
            let name = name.trim();
            if let Some(other) = self.storage.categories.get_by_name(name)? {
                if other.id != id {
                    return Err(PocketError::Duplicate {
                        entity_type: "Category",
                        identifier: name.to_string(),
                    });
                }
            }
            category.name = name.to_string();
        }
        if let Some(icon) = input.icon {
            category.icon = icon;
        }
        if let Some(color) = input.color {
            category.color = color;
        }
        if let Some(kind) = input.kind {
            self.check_kind_change(&category, kind)?;
            category.kind = kind;
        }

        category
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;
        self.storage.log_update(&before, &category)?;

        info!(id = %category.id, name = %category.name, kind = %category.kind, "updated category");
        Ok(category)
    }

    fn check_kind_change(&self, category: &Category, kind: CategoryKind) -> PocketResult<()> {
        for txn_kind in [TransactionType::Income, TransactionType::Expense] {
            if kind.accepts(txn_kind) {
                continue;
            }
            let in_use = self
                .storage
                .transactions
                .query(&TransactionFilter::all().with_category(category.id).with_kind(txn_kind))?
                .len();
            if in_use > 0 {
                return Err(PocketError::Validation(format!(
                    "Category '{}' has {} {} transaction(s); it must keep accepting {}",
                    category.name, in_use, txn_kind, txn_kind
                )));
            }
        }

        if !kind.accepts(TransactionType::Expense)
            && !self
                .storage
                .budgets
                .find(|b| b.category_id == Some(category.id))?
                .is_empty()
        {
            return Err(PocketError::Validation(format!(
                "Category '{}' has budgets; it must keep accepting expenses",
                category.name
            )));
        }
        Ok(())
    }

    /// Delete a category.
    ///
    /// Refuses while transactions or budgets reference it unless `force` is
    /// set; forced deletion leaves those records pointing at an unknown
    /// category, which reports pool as uncategorized.
    pub fn delete(&self, id: CategoryId, force: bool) -> PocketResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| PocketError::category_not_found(id.to_string()))?;

        if !force {
            let txn_count = self.storage.transactions.count_in_category(id)?;
            let budget_count = self
                .storage
                .budgets
                .find(|b| b.category_id == Some(id))?
                .len();
            if txn_count > 0 || budget_count > 0 {
                return Err(PocketError::Validation(format!(
                    "Category '{}' is used by {} transaction(s) and {} budget(s); use --force to delete anyway",
                    category.name, txn_count, budget_count
                )));
            }
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;
        self.storage.log_delete(&category)?;

        info!(id = %category.id, name = %category.name, "deleted category");
        Ok(category)
    }
}
