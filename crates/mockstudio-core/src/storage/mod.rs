//! Storage abstraction for persistence.
//!
//! Backends store opaque JSON blobs under string keys; the typed layer on
//! top of them lives in [`StateStore`].

mod memory;
mod state;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;
pub use state::{DEFAULT_AUTOSAVE_INTERVAL_SECS, PROJECTS_KEY, SESSION_KEY, StateStore};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use state::create_default_storage;

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for key/value blob storage backends.
///
/// Implementations can keep blobs in memory, on the filesystem, or in a
/// browser store; callers only see string keys and string payloads.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Store a blob under a key, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the blob stored under a key.
    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<String>>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored keys.
    fn keys(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check whether a key is present.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Trait for key/value blob storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Store a blob under a key, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the blob stored under a key.
    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<String>>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored keys.
    fn keys(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check whether a key is present.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
