//! Item source trait.
//!
//! Defines the interface to the remote service that supplies candidate items.

use super::model::CandidateItem;
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by an item source.
///
/// The two kinds are kept apart because the pool reacts the same way to both
/// (one generation request, then a re-query) but logs them differently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The request could not be completed.
    #[error("item source unreachable: {0}")]
    Network(String),
    /// The request succeeded but returned no items.
    #[error("item source returned no items")]
    Empty,
}

/// Remote supplier of candidate items.
///
/// # Implementation Notes
///
/// Implementations translate their transport errors into `SourceError` so
/// the pool never sees raw HTTP failures.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetches up to `limit` undecided items.
    ///
    /// Returns `Err(SourceError::Empty)` rather than an empty vector when the
    /// server has nothing to offer.
    async fn fetch_pool(&self, limit: usize) -> Result<Vec<CandidateItem>, SourceError>;

    /// Asks the server to generate a fresh batch of items.
    async fn request_generation(&self) -> Result<(), SourceError>;
}
