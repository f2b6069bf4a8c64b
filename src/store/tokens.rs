//! Single-record token store.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{KvStore, StoreError};
use crate::oauth::TokenRecord;

/// Fixed key holding the most recent token record.
pub const LATEST_TOKEN_KEY: &str = "latest_token";

/// Result of a best-effort write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    Stored,
    /// No backend attached.
    Skipped,
    /// The backend refused the write. The token is still returned to the user.
    Failed(String),
}

/// Result of reading the latest token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    Found(TokenRecord),
    /// No record, or its TTL elapsed.
    NotFound,
    /// No backend attached.
    NotConfigured,
}

/// Adapter persisting the latest [`TokenRecord`] in an optional backend.
#[derive(Clone, Default)]
pub struct TokenStore {
    kv: Option<Arc<dyn KvStore>>,
}

impl TokenStore {
    pub fn new(kv: Option<Arc<dyn KvStore>>) -> Self {
        Self { kv }
    }

    /// A store with no backend.
    pub fn disabled() -> Self {
        Self { kv: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.kv.is_some()
    }

    pub fn backend_name(&self) -> Option<&str> {
        self.kv.as_deref().map(|kv| kv.name())
    }

    /// Overwrite the latest token, expiring `record.expires_in` seconds from now.
    pub async fn put(&self, record: &TokenRecord) -> PutOutcome {
        let Some(kv) = &self.kv else {
            debug!("Token store not configured; skipping persist");
            return PutOutcome::Skipped;
        };

        let value = match serde_json::to_string(record) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Failed to serialize token record");
                return PutOutcome::Failed(e.to_string());
            }
        };

        match kv.put(LATEST_TOKEN_KEY, value, record.ttl()).await {
            Ok(()) => {
                debug!(
                    backend = kv.name(),
                    ttl_secs = record.ttl().as_secs(),
                    "Token record stored"
                );
                PutOutcome::Stored
            }
            Err(e) => {
                warn!(backend = kv.name(), error = %e, "Failed to persist token record");
                PutOutcome::Failed(e.to_string())
            }
        }
    }

    /// Read the latest token.
    pub async fn get(&self) -> Result<TokenLookup, StoreError> {
        let Some(kv) = &self.kv else {
            return Ok(TokenLookup::NotConfigured);
        };

        match kv.get(LATEST_TOKEN_KEY).await? {
            Some(raw) => {
                let record: TokenRecord = serde_json::from_str(&raw)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(TokenLookup::Found(record))
            }
            None => Ok(TokenLookup::NotFound),
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("backend", &self.backend_name())
            .finish()
    }
}
