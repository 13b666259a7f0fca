//! Transaction collection (`transactions.json`)

use std::cmp::Ordering;

use crate::audit::EntityType;
use crate::error::PocketResult;
use crate::models::{CategoryId, Transaction, TransactionFilter, TransactionId};

use super::repository::{JsonRepository, Record};

pub type TransactionRepository = JsonRepository<Transaction>;

impl Record for Transaction {
    type Id = TransactionId;
    const COLLECTION: &'static str = "transactions";
    const ENTITY: EntityType = EntityType::Transaction;

    fn id(&self) -> TransactionId {
        self.id
    }

    fn label(&self) -> Option<String> {
        self.note.clone()
    }

    fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }

    /// Newest first
    fn order(&self, other: &Self) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then_with(|| other.created_at.cmp(&self.created_at))
    }
}

impl JsonRepository<Transaction> {
    /// Transactions passing the filter, newest first, with the filter's
    /// offset and limit applied
    pub fn query(&self, filter: &TransactionFilter) -> PocketResult<Vec<Transaction>> {
        let matching = self.find(|t| filter.matches(t))?;
        Ok(matching
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect())
    }

    /// Number of transactions filed under a category
    pub fn count_in_category(&self, category_id: CategoryId) -> PocketResult<usize> {
        Ok(self.find(|t| t.category_id == category_id)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, Money, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp_dir, repo) = repo();
        let txn = Transaction::expense(CategoryId::new(), Money::from_major(150_000), date(24))
            .with_note("Lunch at restaurant");
        repo.upsert(txn.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(repo.path().clone());
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(txn.id).unwrap(), Some(txn));
    }

    #[test]
    fn test_query_orders_filters_and_pages() {
        let (_temp_dir, repo) = repo();
        let food = CategoryId::new();
        for day in 1..=5 {
            repo.upsert(Transaction::expense(food, Money::from_major(day as i64), date(day)))
                .unwrap();
        }
        repo.upsert(Transaction::income(CategoryId::new(), Money::from_major(100), date(3)))
            .unwrap();

        let all = repo.query(&TransactionFilter::all()).unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].date, date(5));

        let expenses = repo
            .query(&TransactionFilter::all().with_kind(TransactionType::Expense).page(2, 1))
            .unwrap();
        let days: Vec<NaiveDate> = expenses.iter().map(|t| t.date).collect();
        assert_eq!(days, vec![date(4), date(3)]);

        let range = DateRange::new(date(2), date(3)).unwrap();
        let in_range = repo
            .query(&TransactionFilter::all().with_category(food).with_range(range))
            .unwrap();
        assert_eq!(in_range.len(), 2);

        assert_eq!(repo.count_in_category(food).unwrap(), 5);
    }

    #[test]
    fn test_invalid_record_fails_load() {
        let (_temp_dir, repo) = repo();
        let mut txn = Transaction::expense(CategoryId::new(), Money::from_major(1), date(1));
        txn.amount = Money::from_major(-1);
        let json = serde_json::json!({ "transactions": [txn] });
        std::fs::write(repo.path(), json.to_string()).unwrap();

        let err = repo.load().unwrap_err();
        assert!(matches!(err, crate::error::PocketError::Storage(_)));
    }

    #[test]
    fn test_upsert_rejects_invalid() {
        let (_temp_dir, repo) = repo();
        let mut txn = Transaction::expense(CategoryId::new(), Money::from_major(1), date(1));
        txn.amount = Money::from_major(-1);
        assert!(repo.upsert(txn).unwrap_err().is_validation());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
