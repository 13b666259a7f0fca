//! Storage layer for Pocketwise
//!
//! JSON file storage with atomic writes, one file per collection, and the
//! [`Ledger`] trait through which the rest of the program reads records.

pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod repository;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use init::initialize_storage;
pub use repository::{JsonRepository, Record};
pub use transactions::TransactionRepository;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::PocketPaths;
use crate::error::PocketResult;
use crate::models::{Budget, Category, Goal, Transaction, TransactionFilter};

/// Read access to ledger records
pub trait Ledger {
    fn list_transactions(&self, filter: &TransactionFilter) -> PocketResult<Vec<Transaction>>;
    fn list_categories(&self) -> PocketResult<Vec<Category>>;
    fn list_budgets(&self) -> PocketResult<Vec<Budget>>;
    fn list_goals(&self) -> PocketResult<Vec<Goal>>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PocketPaths,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
    pub goals: GoalRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance. Nothing is read until
    /// [`Storage::load_all`].
    pub fn new(paths: PocketPaths) -> PocketResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            goals: GoalRepository::new(paths.goals_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &PocketPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> PocketResult<()> {
        self.transactions.load()?;
        self.categories.load()?;
        self.budgets.load()?;
        self.goals.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> PocketResult<()> {
        self.transactions.save()?;
        self.categories.save()?;
        self.budgets.save()?;
        self.goals.save()?;
        Ok(())
    }

    /// Whether `init` has run
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Record>(&self, record: &T) -> PocketResult<()> {
        self.audit.log(&AuditEntry::create(
            T::ENTITY,
            record.id().to_string(),
            record.label(),
            record,
        ))
    }

    pub fn log_update<T: Record>(&self, before: &T, after: &T) -> PocketResult<()> {
        self.audit.log(&AuditEntry::update(
            T::ENTITY,
            after.id().to_string(),
            after.label(),
            before,
            after,
        ))
    }

    pub fn log_delete<T: Record>(&self, record: &T) -> PocketResult<()> {
        self.audit.log(&AuditEntry::delete(
            T::ENTITY,
            record.id().to_string(),
            record.label(),
            record,
        ))
    }
}

impl Ledger for Storage {
    fn list_transactions(&self, filter: &TransactionFilter) -> PocketResult<Vec<Transaction>> {
        self.transactions.query(filter)
    }

    fn list_categories(&self) -> PocketResult<Vec<Category>> {
        self.categories.get_all()
    }

    fn list_budgets(&self) -> PocketResult<Vec<Budget>> {
        self.budgets.get_all()
    }

    fn list_goals(&self) -> PocketResult<Vec<Goal>> {
        self.goals.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{EntityType, Operation};
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert!(storage.list_goals().unwrap().is_empty());
    }

    #[test]
    fn test_save_all_and_reload() {
        let (temp_dir, storage) = create_test_storage();
        storage
            .goals
            .upsert(Goal::new("Emergency Fund", Money::from_major(50_000_000)))
            .unwrap();
        storage.save_all().unwrap();

        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.list_goals().unwrap().len(), 1);
        assert!(reopened.paths().goals_file().exists());
    }

    #[test]
    fn test_audit_helpers_write_lines() {
        let (_temp_dir, storage) = create_test_storage();
        let before = Goal::new("Laptop", Money::from_major(100));
        let mut after = before.clone();
        after.contribute(Money::from_major(25)).unwrap();

        storage.log_create(&before).unwrap();
        storage.log_update(&before, &after).unwrap();
        storage.log_delete(&after).unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].entity_type, EntityType::Goal);
        assert_eq!(entries[1].operation, Operation::Update);
        assert_eq!(entries[1].changed_fields, vec!["current"]);
        assert_eq!(entries[2].entity_name.as_deref(), Some("Laptop"));
    }
}
