//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::instrument;

use super::{KvStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    deadline: Instant,
}

/// In-memory key-value store.
///
/// Uses `Arc<RwLock<HashMap>>` for thread-safe access. Expired entries are
/// dropped lazily on the next write to the same key and hidden from reads.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_guard(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Entry>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryKvStore {
    #[instrument(skip(self, value))]
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))?;
        let now = Instant::now();
        let deadline = now
            .checked_add(ttl)
            .ok_or_else(|| StoreError::Backend(format!("TTL out of range: {ttl:?}")))?;
        guard.insert(key.to_string(), Entry { value, deadline });
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.read_guard()?;
        let now = Instant::now();
        Ok(guard
            .get(key)
            .filter(|e| e.deadline > now)
            .map(|e| e.value.clone()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
