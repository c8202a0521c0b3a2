use crate::error::Result;
use async_trait::async_trait;

/// Durable key-value store shared across funnel stages.
///
/// Payloads are JSON text. Typed access and writer checks live in
/// [`super::FunnelState`]; implementations only store and return bytes.
#[async_trait]
pub trait FunnelStore: Send + Sync {
    async fn write(&self, key: &str, payload: String) -> Result<()>;

    /// Returns `Ok(None)` when the key is absent.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Removing an absent key is not an error.
    async fn clear(&self, key: &str) -> Result<()>;
}
