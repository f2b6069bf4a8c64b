//! File-backed key-value store.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use super::{KvStore, StoreError};

/// File permissions for entry files (Unix only): owner read/write.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Directory permissions (Unix only): owner read/write/execute.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

/// On-disk wrapper carrying the value and its deadline.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    value: String,
    expires_at: DateTime<Utc>,
}

/// File-backed key-value store.
///
/// Each key is a file `{dir}/{key}.json` holding an [`Envelope`]. Every write
/// goes to its own temp file that is renamed over the target, so readers never
/// see a partial record and concurrent writers never interleave.
///
/// # Security
/// - Entry files are created 0600 on Unix
/// - The directory is created 0700 on Unix
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() {
            return Err(StoreError::Backend("Key cannot be empty".to_string()));
        }
        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(StoreError::Backend(format!(
                "Invalid key '{key}': contains invalid characters"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    async fn ensure_dir(&self) -> Result<(), StoreError> {
        if tokio::fs::try_exists(&self.dir).await.unwrap_or(false) {
            return Ok(());
        }
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            StoreError::Backend(format!(
                "Failed to create store directory '{}': {e}",
                self.dir.display()
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(DIR_MODE);
            tokio::fs::set_permissions(&self.dir, perms).await.map_err(|e| {
                StoreError::Backend(format!(
                    "Failed to set directory permissions on '{}': {e}",
                    self.dir.display()
                ))
            })?;
        }
        Ok(())
    }
}

/// Write `content` to a fresh temp file in `dir` and rename it over `target`.
///
/// Each call gets its own temp file, so concurrent writers of the same key
/// never share a handle; the last rename wins. On any failure the temp file
/// is removed when it drops.
fn write_atomic(dir: &Path, target: &Path, content: &[u8]) -> Result<(), StoreError> {
    use std::io::Write;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
        StoreError::Backend(format!("Failed to create temp file in '{}': {e}", dir.display()))
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(FILE_MODE))
            .map_err(|e| StoreError::Backend(format!("Failed to set entry permissions: {e}")))?;
    }

    temp.write_all(content)
        .map_err(|e| StoreError::Backend(format!("Failed to write entry: {e}")))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| StoreError::Backend(format!("Failed to sync entry: {e}")))?;

    temp.persist(target).map_err(|e| {
        StoreError::Backend(format!(
            "Failed to move entry into '{}': {}",
            target.display(),
            e.error
        ))
    })?;
    Ok(())
}

#[async_trait::async_trait]
impl KvStore for FileKvStore {
    #[instrument(skip(self, value))]
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        self.ensure_dir().await?;
        let path = self.key_path(key)?;

        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| StoreError::Backend(format!("TTL out of range: {e}")))?;
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| StoreError::Backend(format!("TTL out of range: {ttl}")))?;
        let envelope = Envelope { value, expires_at };
        let content = serde_json::to_vec(&envelope)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let dir = self.dir.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &target, &content))
            .await
            .map_err(|e| StoreError::Backend(format!("Entry write task failed: {e}")))??;

        debug!(key, path = %path.display(), "Entry written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;
        let content = match tokio::fs::read(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Backend(format!(
                    "Failed to read entry '{}': {e}",
                    path.display()
                )));
            }
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let envelope: Envelope = serde_json::from_slice(&content).map_err(|e| {
            StoreError::Serialization(format!("Failed to parse '{}': {e}", path.display()))
        })?;

        if envelope.expires_at <= Utc::now() {
            return Ok(None);
        }
        Ok(Some(envelope.value))
    }

    fn name(&self) -> &str {
        "file"
    }
}
