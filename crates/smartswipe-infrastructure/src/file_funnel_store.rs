//! File-backed funnel store.
//!
//! Each key is stored as `<dir>/<key>.json` and written atomically, so a
//! crash mid-write leaves the previous value intact.

use crate::paths::SmartSwipePaths;
use crate::storage::AtomicFile;
use async_trait::async_trait;
use smartswipe_core::error::{FunnelError, Result};
use smartswipe_core::funnel::FunnelStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Funnel store persisting each key in its own JSON file.
#[derive(Debug, Clone)]
pub struct FileFunnelStore {
    dir: PathBuf,
    /// Serializes file operations issued through this store.
    io_lock: Arc<Mutex<()>>,
}

impl FileFunnelStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            io_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a store in the platform data directory.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(SmartSwipePaths::funnel_dir()?))
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid {
            return Err(FunnelError::io(format!("Invalid funnel key '{}'", key)));
        }
        Ok(AtomicFile::new(self.dir.join(format!("{}.json", key))))
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let _guard = self.io_lock.lock().await;
        tokio::task::spawn_blocking(op)
            .await
            .map_err(|e| FunnelError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl FunnelStore for FileFunnelStore {
    async fn write(&self, key: &str, payload: String) -> Result<()> {
        let file = self.file_for(key)?;
        self.run_blocking(move || file.save(&payload)).await?;
        tracing::debug!("[FunnelStore] Wrote {}", key);
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key)?;
        self.run_blocking(move || file.load()).await
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let file = self.file_for(key)?;
        self.run_blocking(move || file.remove()).await
    }
}
