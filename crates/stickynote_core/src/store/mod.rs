//! Note and category state stores.
//!
//! # Responsibility
//! - Own each entity collection exclusively; callers read borrows and
//!   request changes through store methods.
//! - Persist one JSON document per store on every effective mutation.
//! - Notify subscribers synchronously after each persisted mutation.
//!
//! # Invariants
//! - Memory and storage stay mirrored: a failed write rolls the in-memory
//!   change back before the error is returned.
//! - No-op mutations (unknown id) neither write nor notify.
//! - Unreadable documents load as "no prior state".

use crate::storage::{KeyValueStorage, StorageError};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod category_store;
pub mod note_store;
pub mod observer;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store mutation failure. Lookups never fail.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode document `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to persist document `{key}`: {source}")]
    Persist {
        key: String,
        #[source]
        source: StorageError,
    },
}

/// Envelope shared by every persisted store document: `{"state": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PersistedDocument<T> {
    pub state: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

/// Reads and decodes the document under `key`.
///
/// Absent, unreadable, or malformed documents all yield `None`.
pub(crate) fn load_document<S, T>(storage: &S, key: &str, module: &str) -> Option<T>
where
    S: KeyValueStorage + ?Sized,
    T: DeserializeOwned,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=store_load module={module} status=empty key={key}");
            return None;
        }
        Err(err) => {
            warn!("event=store_load module={module} status=error key={key} error_code=storage_read_failed error={err}");
            return None;
        }
    };

    match serde_json::from_str::<PersistedDocument<T>>(&raw) {
        Ok(document) => Some(document.state),
        Err(err) => {
            warn!(
                "event=store_load module={module} status=error key={key} error_code=malformed_document bytes={} error={err}",
                raw.len()
            );
            None
        }
    }
}

/// Encodes `state` into the document envelope and writes it under `key`.
pub(crate) fn save_document<S, T>(
    storage: &S,
    key: &str,
    state: T,
    version: Option<u32>,
) -> StoreResult<()>
where
    S: KeyValueStorage + ?Sized,
    T: Serialize,
{
    let document = PersistedDocument { state, version };
    let encoded = serde_json::to_string(&document).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage
        .set_item(key, &encoded)
        .map_err(|source| StoreError::Persist {
            key: key.to_string(),
            source,
        })
}
