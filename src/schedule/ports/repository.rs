//! Repository port for crop-schedule persistence.
//!
//! The store holds one document per schedule. Writes to an existing
//! schedule are guarded by its version, so two concurrent task actions on
//! the same schedule cannot both succeed.

use crate::land::domain::{LandId, SoilType};
use crate::schedule::domain::{CropName, CropSchedule, ScheduleId, Season};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for schedule repository operations.
pub type ScheduleRepositoryResult<T> = Result<T, ScheduleRepositoryError>;

/// Crop-schedule persistence contract.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Stores a new schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleRepositoryError::DuplicateSchedule`] when the ID
    /// already exists, or [`ScheduleRepositoryError::ActiveScheduleConflict`]
    /// when the schedule is active and another schedule for the same land
    /// and crop already is.
    async fn store(&self, schedule: &CropSchedule) -> ScheduleRepositoryResult<()>;

    /// Replaces a stored schedule if it is still at `expected_version`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleRepositoryError::NotFound`] for unknown schedules
    /// and [`ScheduleRepositoryError::VersionConflict`] when the stored
    /// version differs; the stored document is left untouched.
    async fn update(
        &self,
        schedule: &CropSchedule,
        expected_version: u64,
    ) -> ScheduleRepositoryResult<()>;

    /// Stores an active schedule and, in the same write, deactivates every
    /// other active schedule for its land and crop.
    ///
    /// Returns the identifiers of the deactivated schedules.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleRepositoryError::NotActive`] when the schedule is
    /// not active and [`ScheduleRepositoryError::DuplicateSchedule`] when
    /// its ID already exists.
    async fn activate(&self, schedule: &CropSchedule) -> ScheduleRepositoryResult<Vec<ScheduleId>>;

    /// Finds a schedule by identifier.
    async fn find_by_id(&self, id: ScheduleId) -> ScheduleRepositoryResult<Option<CropSchedule>>;

    /// Finds the active schedule for a land and crop.
    async fn find_active(
        &self,
        land_id: LandId,
        crop_name: &CropName,
    ) -> ScheduleRepositoryResult<Option<CropSchedule>>;

    /// Returns the active schedules of a land, ordered by crop name.
    async fn list_active_by_land(
        &self,
        land_id: LandId,
    ) -> ScheduleRepositoryResult<Vec<CropSchedule>>;

    /// Returns every schedule of a land, oldest first.
    async fn list_by_land(&self, land_id: LandId) -> ScheduleRepositoryResult<Vec<CropSchedule>>;

    /// Finds the most recently created schedule for a land and crop.
    async fn find_latest_for_crop(
        &self,
        land_id: LandId,
        crop_name: &CropName,
    ) -> ScheduleRepositoryResult<Option<CropSchedule>>;

    /// Finds the most recently created schedule for a land, crop, soil
    /// type, and season.
    async fn find_latest_matching(
        &self,
        land_id: LandId,
        crop_name: &CropName,
        soil_type: &SoilType,
        season: Season,
    ) -> ScheduleRepositoryResult<Option<CropSchedule>>;
}

/// Errors returned by schedule repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ScheduleRepositoryError {
    /// A schedule with the same identifier already exists.
    #[error("duplicate schedule identifier: {0}")]
    DuplicateSchedule(ScheduleId),

    /// The schedule does not exist.
    #[error("schedule not found: {0}")]
    NotFound(ScheduleId),

    /// The stored schedule changed since it was read.
    #[error("schedule {id} is at version {actual}, expected {expected}")]
    VersionConflict {
        /// Schedule written.
        id: ScheduleId,
        /// Version the writer read.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// Another schedule is already active for the land and crop.
    #[error("schedule {existing} is already active for {crop_name} on land {land_id}")]
    ActiveScheduleConflict {
        /// Land concerned.
        land_id: LandId,
        /// Crop concerned.
        crop_name: CropName,
        /// The schedule that is already active.
        existing: ScheduleId,
    },

    /// An inactive schedule was passed to an activation.
    #[error("schedule {0} is not active")]
    NotActive(ScheduleId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ScheduleRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
