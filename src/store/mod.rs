//! Key-value storage for the latest token.
//!
//! - [`KvStore`] - backend trait: string values with a time-to-live
//! - [`MemoryKvStore`] - in-process map, for tests and ephemeral runs
//! - [`FileKvStore`] - one JSON envelope per key on disk
//! - [`TokenStore`] - the single-record adapter used by the handlers
//!
//! Backends own expiry: an entry read after its deadline is reported as
//! absent. Nothing ever deletes the token record explicitly.

pub mod file;
pub mod memory;
pub mod tokens;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;
pub use tokens::{LATEST_TOKEN_KEY, PutOutcome, TokenLookup, TokenStore};

use std::sync::Arc;
use std::time::Duration;

use crate::config::{StoreBackend, StoreConfig};

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored record is unreadable: {0}")]
    Serialization(String),
}

/// A key-value backend with per-entry expiry.
///
/// Writes are last-write-wins; a `put` replaces the previous value and its
/// deadline.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// Store `value` under `key`, expiring `ttl` from now.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError>;

    /// Read `key`. Missing and expired entries are both `None`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Backend name for logs and diagnostics.
    fn name(&self) -> &str;
}

/// Build the backend selected in config, if any.
pub fn from_config(config: &StoreConfig) -> Option<Arc<dyn KvStore>> {
    match config.backend {
        StoreBackend::None => None,
        StoreBackend::Memory => Some(Arc::new(MemoryKvStore::new())),
        StoreBackend::File => Some(Arc::new(FileKvStore::new(config.path.clone()))),
    }
}
