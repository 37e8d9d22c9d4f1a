//! Repository port for saved crop-planning records.

use crate::land::domain::LandId;
use crate::schedule::domain::{PlanningRecord, PlanningRecordId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for planning record repository operations.
pub type PlanningRecordRepositoryResult<T> = Result<T, PlanningRecordRepositoryError>;

/// Planning record persistence contract.
#[async_trait]
pub trait PlanningRecordRepository: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRecordRepositoryError::DuplicateRecord`] when the
    /// ID already exists.
    async fn store(&self, record: &PlanningRecord) -> PlanningRecordRepositoryResult<()>;

    /// Finds a record by identifier.
    async fn find_by_id(
        &self,
        id: PlanningRecordId,
    ) -> PlanningRecordRepositoryResult<Option<PlanningRecord>>;

    /// Returns the records of a land, newest first.
    async fn list_by_land(
        &self,
        land_id: LandId,
    ) -> PlanningRecordRepositoryResult<Vec<PlanningRecord>>;
}

/// Errors returned by planning record repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PlanningRecordRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate planning record identifier: {0}")]
    DuplicateRecord(PlanningRecordId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PlanningRecordRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
