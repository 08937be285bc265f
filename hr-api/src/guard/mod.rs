//! Integrity guard
//!
//! Cross-entity rules checked before each write: referenced rows exist,
//! emails are unique, dependents block deletes. Checks are read-then-decide
//! without a wrapping transaction, so they are advisory. The store's unique
//! index and foreign keys reject whatever slips through a race, surfacing
//! as a constraint error instead of a validation error.
//!
//! Partial updates apply exactly one field per call. Every supplied field
//! is validated in a fixed order and the last supplied one is written.

mod department;
mod employee;
mod location;

use serde::Serialize;
use serde_json::Value;

use crate::db::Store;

/// Validates mutations against the current store contents
pub struct IntegrityGuard<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> IntegrityGuard<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

/// JSON copy of a row attached to error and delete responses
fn snapshot<T: Serialize>(row: &T) -> Value {
    serde_json::to_value(row).unwrap_or_default()
}

/// A supplied string: present and non-empty
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A supplied id: present and non-zero
fn supplied_id(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}
