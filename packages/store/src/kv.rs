//! # Durable key/value storage
//!
//! [`KeyValueStore`] is the small synchronous contract the client uses for
//! anything that must survive a restart: the bearer token, the serialized
//! identity and the theme preference. Values are plain strings; callers own
//! their encoding (JSON for records, raw text for tokens).
//!
//! ## Backends
//!
//! | Backend | Platform | Persistence |
//! |---------|----------|-------------|
//! | [`crate::MemoryStore`] | all | process lifetime only (tests, fallback) |
//! | [`crate::FileStore`] | native | one file per key under a base directory |
//! | [`crate::LocalStorage`] | web (`web` feature) | browser `window.localStorage` |
//!
//! Reads never fail: a missing or unreadable entry is `None`. Writes report a
//! [`StorageError`] so that callers can decide whether to surface or swallow it.

use std::sync::Arc;

use thiserror::Error;

/// Failure to persist or delete a value.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing filesystem rejected the operation.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    /// The storage facility is not reachable (no window, quota exceeded, read-only).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A synchronous string key/value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
