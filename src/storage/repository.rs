//! Generic JSON-file repository
//!
//! Each ledger collection lives in its own file as
//! `{ "<collection>": [ ...records ] }`, held in memory behind a `RwLock`
//! keyed by record id. Records are validated as they are loaded.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::audit::EntityType;
use crate::error::{PocketError, PocketResult};

use super::file_io::{read_json, write_json_atomic};

/// A record type that can be stored in a [`JsonRepository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + Display;

    /// Key of the record array in the JSON file
    const COLLECTION: &'static str;

    /// Entity kind recorded in the audit log
    const ENTITY: EntityType;

    fn id(&self) -> Self::Id;

    /// Human-readable label for logs
    fn label(&self) -> Option<String>;

    /// Structural validation applied on load and before writes
    fn check(&self) -> Result<(), String>;

    /// Listing order
    fn order(&self, other: &Self) -> Ordering;
}

/// Repository for one record collection
pub struct JsonRepository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> JsonRepository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> PocketResult<RwLockReadGuard<'_, HashMap<T::Id, T>>> {
        self.data
            .read()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> PocketResult<RwLockWriteGuard<'_, HashMap<T::Id, T>>> {
        self.data
            .write()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load records from disk, replacing anything in memory.
    ///
    /// A missing file loads as empty; an invalid record fails the load.
    pub fn load(&self) -> PocketResult<()> {
        let mut file_data: BTreeMap<String, Vec<T>> = read_json(&self.path)?;
        let records = file_data.remove(T::COLLECTION).unwrap_or_default();

        for record in &records {
            record.check().map_err(|e| {
                PocketError::Storage(format!(
                    "Invalid record {} in {}: {}",
                    record.id(),
                    self.path.display(),
                    e
                ))
            })?;
        }

        let mut data = self.write()?;
        data.clear();
        data.extend(records.into_iter().map(|r| (r.id(), r)));

        debug!(collection = T::COLLECTION, count = data.len(), "loaded records");
        Ok(())
    }

    /// Write all records to disk
    pub fn save(&self) -> PocketResult<()> {
        let records = self.get_all()?;
        let count = records.len();

        let mut file_data = BTreeMap::new();
        file_data.insert(T::COLLECTION, records);
        write_json_atomic(&self.path, &file_data)?;

        debug!(collection = T::COLLECTION, count, "saved records");
        Ok(())
    }

    pub fn get(&self, id: T::Id) -> PocketResult<Option<T>> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records in listing order
    pub fn get_all(&self) -> PocketResult<Vec<T>> {
        let mut records: Vec<T> = self.read()?.values().cloned().collect();
        records.sort_by(|a, b| a.order(b));
        Ok(records)
    }

    /// Records matching a predicate, in listing order
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> PocketResult<Vec<T>> {
        let mut records: Vec<T> = self
            .read()?
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.order(b));
        Ok(records)
    }

    /// Insert or replace a record, returning the previous version
    pub fn upsert(&self, record: T) -> PocketResult<Option<T>> {
        record.check().map_err(PocketError::Validation)?;
        Ok(self.write()?.insert(record.id(), record))
    }

    /// Remove a record, returning it if it existed
    pub fn delete(&self, id: T::Id) -> PocketResult<Option<T>> {
        Ok(self.write()?.remove(&id))
    }

    pub fn count(&self) -> PocketResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
