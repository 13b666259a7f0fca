//! Transaction service
//!
//! Records income and expenses against existing categories.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::{PocketError, PocketResult};
use crate::models::{
    CategoryId, Money, Transaction, TransactionFilter, TransactionId, TransactionType,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionType,
    pub category_id: CategoryId,
    pub amount: Money,
    pub date: NaiveDate,
    pub note: Option<String>,
}

/// Fields to change on an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> PocketResult<Transaction> {
        self.check_category(input.category_id, input.kind)?;

        let mut txn = Transaction::new(input.kind, input.category_id, input.amount, input.date);
        if let Some(note) = input.note {
            let note = note.trim();
            if !note.is_empty() {
                txn.note = Some(note.to_string());
            }
        }

        txn.validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_create(&txn)?;

        info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "created transaction");
        Ok(txn)
    }

    /// The category must exist and accept the transaction's direction
    fn check_category(&self, category_id: CategoryId, kind: TransactionType) -> PocketResult<()> {
        let category = self
            .storage
            .categories
            .get(category_id)?
            .ok_or_else(|| PocketError::category_not_found(category_id.to_string()))?;

        if !category.kind.accepts(kind) {
            return Err(PocketError::Validation(format!(
                "Category '{}' is for {} transactions, not {}",
                category.name, category.kind, kind
            )));
        }
        Ok(())
    }

    pub fn get(&self, id: TransactionId) -> PocketResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full id, display id ("txn-1a2b3c4d") or id
    /// prefix
    pub fn find(&self, reference: &str) -> PocketResult<Option<Transaction>> {
        if let Ok(id) = reference.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }
        let matches = self.storage.transactions.find(|t| t.id.matches_ref(reference))?;
        match matches.len() {
            0 | 1 => Ok(matches.into_iter().next()),
            n => Err(PocketError::Validation(format!(
                "'{}' matches {} transactions; use a longer id",
                reference, n
            ))),
        }
    }

    /// Transactions passing the filter, newest first
    pub fn list(&self, filter: &TransactionFilter) -> PocketResult<Vec<Transaction>> {
        self.storage.transactions.query(filter)
    }

    /// Update a transaction
    pub fn update(&self, id: TransactionId, input: UpdateTransactionInput) -> PocketResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| PocketError::transaction_not_found(id.to_string()))?;
        let before = txn.clone();

        if let Some(category_id) = input.category_id {
            self.check_category(category_id, txn.kind)?;
            txn.category_id = category_id;
        }
        if let Some(amount) = input.amount {
            txn.amount = amount;
        }
        if let Some(date) = input.date {
            txn.date = date;
        }
        if let Some(note) = input.note {
            let note = note.trim();
            txn.note = (!note.is_empty()).then(|| note.to_string());
        }
        txn.updated_at = Utc::now();

        txn.validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_update(&before, &txn)?;

        info!(id = %txn.id, "updated transaction");
        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> PocketResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| PocketError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.save()?;
        self.storage.log_delete(&txn)?;

        info!(id = %txn.id, "deleted transaction");
        Ok(txn)
    }
}
