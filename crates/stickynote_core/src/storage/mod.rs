//! Client-local key/value storage abstraction.
//!
//! # Responsibility
//! - Mirror the browser storage contract (`getItem/setItem/removeItem`).
//! - Let stores persist without knowing the backing medium.
//!
//! # Invariants
//! - Values are opaque UTF-8 documents; storage never interprets them.
//! - All calls are synchronous and complete before returning.

use crate::db::DbError;
use std::rc::Rc;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level storage failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("storage table `{0}` is missing")]
    MissingTable(&'static str),
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous string key/value storage.
///
/// Methods take `&self`; single-threaded implementations use interior
/// mutability so one handle can back several stores.
pub trait KeyValueStorage {
    /// Returns the stored value, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Inserts or replaces the value under `key`.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`; absent keys are not an error.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Rc<T> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}
