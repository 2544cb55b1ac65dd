//! Flat key-value persistence shared by the candidate, settings, and interview stores.
//!
//! Every record lives under one well-known key as a single serialized JSON value. Stores
//! read the whole value, change it in memory, and write the whole value back; backends only
//! need to make a single `put` appear atomic.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Key holding the serialized candidate collection.
pub const CANDIDATES_KEY: &str = "candidates";
/// Key holding the append-only interview schedule.
pub const INTERVIEWS_KEY: &str = "scheduled-interviews";
/// Key holding the process-wide settings record.
pub const SETTINGS_KEY: &str = "hrtech-settings";

/// Persistence backend abstraction so stores can run against files or memory.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Push buffered writes to durable storage. Write-through backends have nothing to do.
    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Error enumeration for backend failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage key '{0}' is not a valid record name")]
    InvalidKey(String),
    #[error("i/o failure on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Read and decode `key`, treating an absent or undecodable value as `T::default()`.
///
/// Backend read failures still propagate so a mutation never overwrites data it could not see.
pub(crate) fn read_json<T, B>(backend: &B, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
    B: KeyValueStore + ?Sized,
{
    let Some(raw) = backend.get(key)? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(key, error = %err, "discarding unreadable stored value");
            Ok(T::default())
        }
    }
}

pub(crate) fn write_json<T, B>(backend: &B, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    B: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    backend.put(key, &encoded)
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
