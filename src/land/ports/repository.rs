//! Repository port for land persistence and lookup.

use crate::land::domain::{Land, LandId, OwnerId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for land repository operations.
pub type LandRepositoryResult<T> = Result<T, LandRepositoryError>;

/// Land persistence contract.
#[async_trait]
pub trait LandRepository: Send + Sync {
    /// Stores a newly registered land.
    ///
    /// # Errors
    ///
    /// Returns [`LandRepositoryError::DuplicateLand`] when the land ID
    /// already exists.
    async fn store(&self, land: &Land) -> LandRepositoryResult<()>;

    /// Finds a land by identifier.
    ///
    /// Returns `None` when the land does not exist.
    async fn find_by_id(&self, id: LandId) -> LandRepositoryResult<Option<Land>>;

    /// Returns all lands owned by the given grower, oldest first.
    async fn list_by_owner(&self, owner_id: &OwnerId) -> LandRepositoryResult<Vec<Land>>;
}

/// Errors returned by land repository implementations.
#[derive(Debug, Clone, Error)]
pub enum LandRepositoryError {
    /// A land with the same identifier already exists.
    #[error("duplicate land identifier: {0}")]
    DuplicateLand(LandId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LandRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
