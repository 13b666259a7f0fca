//! Audit trail for ledger mutations
//!
//! Every create, update and delete performed through the services is
//! appended to `audit.log` as one JSON object per line, carrying snapshots of
//! the record before and after the change.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
