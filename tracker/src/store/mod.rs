//! Entity store: durable storage for the four entity kinds with
//! referential-integrity enforcement.
//!
//! Every mutating operation runs inside a single transaction; the transaction
//! is committed on success and rolled back when dropped on any failure path.
//! Uniqueness and foreign keys are pre-checked inside that transaction, with
//! the database constraints as the final arbiter for concurrent writers.

use sea_orm::DbErr;
use thiserror::Error;

pub mod departments;
pub mod users;
pub mod workstation_types;
pub mod workstations;

/// Default page size for `list` operations.
pub const DEFAULT_LIMIT: u64 = 100;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The id did not resolve to a row. Carries the entity kind name.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Unique-column collision, or a delete blocked by existing references.
    #[error("{0}")]
    Conflict(String),
    /// A supplied foreign key points at no existing row.
    #[error("{0}")]
    MissingReference(String),
    /// Malformed field value rejected at the boundary.
    #[error("{0}")]
    Validation(String),
    /// Unexpected datastore failure.
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Map a write error to `Conflict` when the backend reports a unique
/// violation; anything else stays an unexpected datastore failure.
pub(crate) fn unique_violation(e: DbErr, what: &str) -> StoreError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("unique") {
        StoreError::Conflict(format!("{what} already exists"))
    } else {
        StoreError::Db(e)
    }
}

/// Reject a date string that does not parse as an ISO calendar date.
pub(crate) fn check_iso_date(field: &str, value: &str) -> Result<(), StoreError> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| StoreError::Validation(format!("{field} must be a YYYY-MM-DD date")))
}

/// Creation-date default for arrival fields, as a `YYYY-MM-DD` string.
pub(crate) fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
