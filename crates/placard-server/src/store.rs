//! In-memory storage of interaction results.

use chrono::Utc;
use placard_types::{Frame, ResultId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur when accessing the result store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A handler panicked while holding the store lock.
    #[error("result store lock poisoned")]
    Poisoned,
}

/// Outcome of one proxied interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredResult {
    /// The frame host answered with a new frame document.
    Frame {
        /// The parsed frame document.
        frame: Frame,
    },
    /// The frame host answered the redirect-capturing call.
    Redirect {
        /// HTTP status the host answered with.
        status: u16,
        /// Redirect destination, when the host answered `302`.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        location: Option<String>,
    },
}

/// One stored interaction result, retrievable by its id for positional
/// replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Identifier handed back to the client.
    pub id: ResultId,
    /// The interaction outcome.
    #[serde(flatten)]
    pub result: StoredResult,
    /// ISO 8601 timestamp of when the result was stored.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// In-memory store of interaction results, shared across handlers.
///
/// Uses `std::sync::RwLock` intentionally: all lock acquisitions are brief
/// HashMap operations that never span `.await` points, making a
/// synchronous lock safe and more efficient than `tokio::sync::RwLock`.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    inner: Arc<RwLock<HashMap<ResultId, ResultRecord>>>,
}

impl ResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an interaction result under a freshly minted id and returns
    /// the full record.
    pub fn insert(&self, result: StoredResult) -> Result<ResultRecord, StoreError> {
        let record = ResultRecord {
            id: ResultId::generate(),
            result,
            created_at: Utc::now().to_rfc3339(),
        };
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    /// Retrieves a stored result by id.
    pub fn get(&self, id: &ResultId) -> Result<Option<ResultRecord>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.get(id).cloned())
    }

    /// Number of stored results.
    pub fn len(&self) -> Result<usize, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.len())
    }

    /// True if nothing has been stored yet.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_mints_distinct_ids() {
        let store = ResultStore::new();
        let a = store
            .insert(StoredResult::Redirect {
                status: 302,
                location: Some("https://x.example".to_string()),
            })
            .unwrap();
        let b = store
            .insert(StoredResult::Redirect {
                status: 302,
                location: None,
            })
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn get_returns_the_stored_record() {
        let store = ResultStore::new();
        let record = store
            .insert(StoredResult::Redirect {
                status: 200,
                location: None,
            })
            .unwrap();

        let fetched = store.get(&record.id).unwrap().unwrap();
        assert_eq!(fetched, record);
        assert!(store
            .get(&placard_types::ResultId::from("missing"))
            .unwrap()
            .is_none());
    }
}
