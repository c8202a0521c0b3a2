//! In-memory funnel store.

use async_trait::async_trait;
use smartswipe_core::error::Result;
use smartswipe_core::funnel::FunnelStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Funnel store backed by a map. State lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFunnelStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryFunnelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl FunnelStore for InMemoryFunnelStore {
    async fn write(&self, key: &str, payload: String) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), payload);
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
