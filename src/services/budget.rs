//! Budget service
//!
//! Stores budget definitions and evaluates them against recorded spending.

use chrono::{NaiveDate, Utc, Weekday};
use tracing::info;

use crate::error::{PocketError, PocketResult};
use crate::models::{
    Budget, BudgetId, BudgetPeriod, CategoryId, Money, Transaction, TransactionFilter,
    TransactionType,
};
use crate::reports::{compute_overview, compute_progress, BudgetOverview, BudgetProgress};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Fields to change on an existing budget; `None` leaves a field as is.
///
/// `category_id: Some(None)` turns the budget into a wallet-wide one and
/// `end_date: Some(None)` makes it open-ended.
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    pub name: Option<String>,
    pub limit: Option<Money>,
    pub category_id: Option<Option<CategoryId>>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub alert_threshold: Option<f64>,
}

impl UpdateBudgetInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.limit.is_none()
            && self.category_id.is_none()
            && self.period.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.alert_threshold.is_none()
    }
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Store a new budget
    pub fn create(&self, budget: Budget) -> PocketResult<Budget> {
        budget
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;
        if let Some(category_id) = budget.category_id {
            self.check_category(category_id)?;
        }

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;
        self.storage.log_create(&budget)?;

        info!(id = %budget.id, name = %budget.name, limit = %budget.limit, period = %budget.period, "created budget");
        Ok(budget)
    }

    pub fn get(&self, id: BudgetId) -> PocketResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by name (case-insensitive) or id reference
    pub fn find(&self, reference: &str) -> PocketResult<Option<Budget>> {
        if let Ok(id) = reference.parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }
        let name = reference.trim().to_lowercase();
        Ok(self
            .storage
            .budgets
            .find(|b| b.name.to_lowercase() == name || b.id.matches_ref(reference))?
            .into_iter()
            .next())
    }

    pub fn list(&self) -> PocketResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Change the limit of a budget
    pub fn set_limit(&self, id: BudgetId, limit: Money) -> PocketResult<Budget> {
        self.update(
            id,
            UpdateBudgetInput {
                limit: Some(limit),
                ..Default::default()
            },
        )
    }

    /// Update a budget's definition
    pub fn update(&self, id: BudgetId, input: UpdateBudgetInput) -> PocketResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| PocketError::budget_not_found(id.to_string()))?;
        let before = budget.clone();

        if let Some(name) = input.name {
            budget.name = name.trim().to_string();
        }
        if let Some(limit) = input.limit {
            budget.limit = limit;
        }
        if let Some(category_id) = input.category_id {
            if let Some(category_id) = category_id {
                self.check_category(category_id)?;
            }
            budget.category_id = category_id;
        }
        if let Some(period) = input.period {
            budget.period = period;
        }
        if let Some(start_date) = input.start_date {
            budget.start_date = start_date;
        }
        if let Some(end_date) = input.end_date {
            budget.end_date = end_date;
        }
        if let Some(threshold) = input.alert_threshold {
            budget.alert_threshold = threshold;
        }
        budget.updated_at = Utc::now();

        budget
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;
        self.storage.log_update(&before, &budget)?;

        info!(id = %budget.id, name = %budget.name, limit = %budget.limit, period = %budget.period, "updated budget");
        Ok(budget)
    }

    /// Delete a budget
    pub fn delete(&self, id: BudgetId) -> PocketResult<Budget> {
        let budget = self
            .storage
            .budgets
            .delete(id)?
            .ok_or_else(|| PocketError::budget_not_found(id.to_string()))?;

        self.storage.budgets.save()?;
        self.storage.log_delete(&budget)?;

        info!(id = %budget.id, name = %budget.name, "deleted budget");
        Ok(budget)
    }

    /// Progress of one budget as of a date
    pub fn progress(
        &self,
        id: BudgetId,
        as_of: NaiveDate,
        week_start: Weekday,
    ) -> PocketResult<BudgetProgress> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| PocketError::budget_not_found(id.to_string()))?;
        let expenses = self.expenses()?;
        compute_progress(&budget, &expenses, as_of, week_start)
    }

    /// Progress of every budget with totals
    pub fn overview(&self, as_of: NaiveDate, week_start: Weekday) -> PocketResult<BudgetOverview> {
        let budgets = self.list()?;
        let expenses = self.expenses()?;
        compute_overview(&budgets, &expenses, as_of, week_start)
    }

    /// A category-scoped budget must point at an existing category that
    /// accepts expenses
    fn check_category(&self, category_id: CategoryId) -> PocketResult<()> {
        let category = self
            .storage
            .categories
            .get(category_id)?
            .ok_or_else(|| PocketError::category_not_found(category_id.to_string()))?;
        if !category.kind.accepts(TransactionType::Expense) {
            return Err(PocketError::Validation(format!(
                "Category '{}' does not take expenses",
                category.name
            )));
        }
        Ok(())
    }

    fn expenses(&self) -> PocketResult<Vec<Transaction>> {
        self.storage
            .transactions
            .query(&TransactionFilter::all().with_kind(TransactionType::Expense))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::PocketPaths;
    use crate::models::{Category, CategoryKind};
    use crate::reports::BudgetStatus;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage, Category) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let food = Category::new("Food & Dining", "restaurant-outline", "#EF4444", CategoryKind::Expense);
        storage.categories.upsert(food.clone()).unwrap();
        (temp_dir, storage, food)
    }

    fn monthly_food(food: &Category) -> Budget {
        Budget::new(
            "Food",
            Some(food.id),
            Money::from_major(3_000_000),
            BudgetPeriod::Monthly,
            date(2025, 1, 1),
        )
    }

    #[test]
    fn test_create_and_find() {
        let (_temp_dir, storage, food) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service.create(monthly_food(&food)).unwrap();
        assert_eq!(service.find("food").unwrap().map(|b| b.id), Some(budget.id));
        assert_eq!(
            service.find(&budget.id.to_string()).unwrap().map(|b| b.id),
            Some(budget.id)
        );
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_unknown_category() {
        let (_temp_dir, storage, _food) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = Budget::new(
            "Ghost",
            Some(CategoryId::new()),
            Money::from_major(10),
            BudgetPeriod::Weekly,
            date(2025, 1, 1),
        );
        assert!(service.create(budget).unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_rejects_bad_threshold() {
        let (_temp_dir, storage, food) = create_test_storage();
        let service = BudgetService::new(&storage);

        let err = service
            .create(monthly_food(&food).with_alert_threshold(1.5))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_progress_and_overview() {
        let (_temp_dir, storage, food) = create_test_storage();
        let service = BudgetService::new(&storage);
        let budget = service.create(monthly_food(&food)).unwrap();

        storage
            .transactions
            .upsert(Transaction::expense(food.id, Money::from_major(2_500_000), date(2025, 11, 5)))
            .unwrap();

        let progress = service
            .progress(budget.id, date(2025, 11, 24), Weekday::Mon)
            .unwrap();
        assert_eq!(progress.status, BudgetStatus::Warning);
        assert_eq!(progress.remaining, Money::from_major(500_000));

        let overview = service.overview(date(2025, 12, 1), Weekday::Mon).unwrap();
        assert_eq!(overview.total_spent, Money::zero());
        assert_eq!(overview.total_remaining, Money::from_major(3_000_000));
    }

    #[test]
    fn test_set_limit_and_delete() {
        let (_temp_dir, storage, food) = create_test_storage();
        let service = BudgetService::new(&storage);
        let budget = service.create(monthly_food(&food)).unwrap();

        let updated = service.set_limit(budget.id, Money::from_major(4_000_000)).unwrap();
        assert_eq!(updated.limit, Money::from_major(4_000_000));
        assert!(service
            .set_limit(budget.id, Money::from_major(-1))
            .unwrap_err()
            .is_validation());

        service.delete(budget.id).unwrap();
        assert!(service.delete(budget.id).unwrap_err().is_not_found());
        assert_eq!(storage.audit().read_all().unwrap().len(), 3);
    }

    #[test]
    fn test_create_rejects_zero_limit() {
        let (_temp_dir, storage, food) = create_test_storage();
        let service = BudgetService::new(&storage);

        let mut budget = monthly_food(&food);
        budget.limit = Money::zero();
        assert!(service.create(budget).unwrap_err().is_validation());
        assert!(service.list().unwrap().is_empty());

        let budget = service.create(monthly_food(&food)).unwrap();
        assert!(service
            .set_limit(budget.id, Money::zero())
            .unwrap_err()
            .is_validation());
        assert_eq!(
            service.get(budget.id).unwrap().unwrap().limit,
            Money::from_major(3_000_000)
        );
    }

    #[test]
    fn test_update_budget() {
        let (_temp_dir, storage, food) = create_test_storage();
        let service = BudgetService::new(&storage);
        let budget = service.create(monthly_food(&food)).unwrap();

        let updated = service
            .update(
                budget.id,
                UpdateBudgetInput {
                    name: Some("  Groceries ".into()),
                    limit: Some(Money::from_major(700_000)),
                    period: Some(BudgetPeriod::Weekly),
                    end_date: Some(Some(date(2025, 12, 31))),
                    alert_threshold: Some(0.9),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Groceries");
        assert_eq!(updated.limit, Money::from_major(700_000));
        assert_eq!(updated.period, BudgetPeriod::Weekly);
        assert_eq!(updated.end_date, Some(date(2025, 12, 31)));
        assert_eq!(updated.created_at, budget.created_at);

        let wallet = service
            .update(
                budget.id,
                UpdateBudgetInput {
                    category_id: Some(None),
                    end_date: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(wallet.is_wallet_wide());
        assert!(wallet.end_date.is_none());

        let history = storage.audit().read_all().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].operation, Operation::Update);
    }

    #[test]
    fn test_update_rejects_invalid_changes() {
        let (_temp_dir, storage, food) = create_test_storage();
        let service = BudgetService::new(&storage);
        let budget = service.create(monthly_food(&food)).unwrap();

        let salary = Category::new("Salary", "cash-outline", "#10B981", CategoryKind::Income);
        storage.categories.upsert(salary.clone()).unwrap();

        let err = service
            .update(
                budget.id,
                UpdateBudgetInput {
                    category_id: Some(Some(salary.id)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .update(
                budget.id,
                UpdateBudgetInput {
                    end_date: Some(Some(date(2024, 6, 30))),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service
            .update(BudgetId::new(), UpdateBudgetInput::default())
            .unwrap_err()
            .is_not_found());
        assert_eq!(service.get(budget.id).unwrap().unwrap(), budget);
    }
}
