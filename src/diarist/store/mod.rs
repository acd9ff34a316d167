//! # Storage Layer
//!
//! Diaries are persisted through the [`KeyValueStore`] trait: string keys,
//! string values, whole-value reads and writes. This is the contract of a
//! browser's local storage, and every mutation in the crate follows the same
//! discipline: read the full collection, change it in memory, write it back.
//!
//! ## Keys
//!
//! ```text
//! diaries              # JSON array of DiaryRecord, creation order
//! entries_<diaryId>    # JSON array of Entry, append order
//! theme                # "dark" | "light"
//! ```
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one file per key under `<data dir>/storage/`
//! - [`memory::InMemoryStore`]: no persistence, for tests
//!
//! ## Corrupt collections
//!
//! [`load_collection`] reports unparsable JSON as
//! [`DiaryError::StorageCorruption`]. Commands read through
//! [`load_or_recover`] instead, which logs the corruption and treats the
//! collection as empty so the diary stays usable. The next write replaces the
//! unreadable value. The detail view also tells the reader, see
//! [`crate::commands::entries::entries_for_display`].

use crate::error::{DiaryError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod fs;
pub mod memory;

pub const DIARIES_KEY: &str = "diaries";
pub const THEME_KEY: &str = "theme";

/// Abstract interface for the local key-value storage.
pub trait KeyValueStore {
    /// Read a value, `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keys are used as file names by some backends, so they are restricted.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(DiaryError::Store(format!("Invalid storage key: {:?}", key)))
    }
}

/// Strict read of a JSON array stored under `key`.
pub fn load_collection<S, T>(store: &S, key: &str) -> Result<Vec<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|source| DiaryError::StorageCorruption {
            key: key.to_string(),
            source,
        }),
    }
}

/// Read a JSON array, recovering from corruption by starting over empty.
pub fn load_or_recover<S, T>(store: &S, key: &str) -> Result<Vec<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match load_collection(store, key) {
        Err(DiaryError::StorageCorruption { key, source }) => {
            tracing::warn!(%key, error = %source, "discarding unreadable collection");
            Ok(Vec::new())
        }
        other => other,
    }
}

pub fn save_collection<S, T>(store: &mut S, key: &str, items: &[T]) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(items)?;
    tracing::debug!(%key, items = items.len(), bytes = raw.len(), "writing collection");
    store.set(key, &raw)
}
