//! Key-value persistence service.
//!
//! The cart only needs an opaque async string store: read a key, overwrite a
//! key, delete a key. Backends implement [`KeyValueStore`]; the cart store
//! holds one as `Arc<dyn KeyValueStore>`.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }
}

/// Async key-value store holding string values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`. Returns `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
