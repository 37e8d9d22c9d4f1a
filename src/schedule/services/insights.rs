//! Service layer for derived schedule and land views.

use crate::land::{
    domain::LandId,
    ports::{LandRepository, LandRepositoryError},
};
use crate::schedule::{
    domain::{CropOverview, LandOverview, ScheduleId, ScheduleInsight, YieldInput},
    ports::{ScheduleRepository, ScheduleRepositoryError, YieldEstimator},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for insight queries.
#[derive(Debug, Error)]
pub enum ScheduleInsightsError {
    /// Schedule repository operation failed.
    #[error(transparent)]
    Repository(#[from] ScheduleRepositoryError),
    /// Land repository operation failed.
    #[error(transparent)]
    Land(#[from] LandRepositoryError),
    /// The schedule does not exist.
    #[error("schedule not found: {0}")]
    ScheduleNotFound(ScheduleId),
    /// The land does not exist.
    #[error("land not found: {0}")]
    LandNotFound(LandId),
}

/// Result type for insight service operations.
pub type ScheduleInsightsResult<T> = Result<T, ScheduleInsightsError>;

/// Read-only service computing progress, health, and yield views.
#[derive(Clone)]
pub struct ScheduleInsightsService<R, L, E>
where
    R: ScheduleRepository,
    L: LandRepository,
    E: YieldEstimator,
{
    schedules: Arc<R>,
    lands: Arc<L>,
    estimator: Arc<E>,
}

impl<R, L, E> ScheduleInsightsService<R, L, E>
where
    R: ScheduleRepository,
    L: LandRepository,
    E: YieldEstimator,
{
    /// Creates a new insights service.
    #[must_use]
    pub const fn new(schedules: Arc<R>, lands: Arc<L>, estimator: Arc<E>) -> Self {
        Self {
            schedules,
            lands,
            estimator,
        }
    }

    /// Derives the current view of a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleInsightsError::ScheduleNotFound`] or
    /// [`ScheduleInsightsError::LandNotFound`] for unknown records and
    /// repository errors otherwise.
    pub async fn schedule_insight(
        &self,
        schedule_id: ScheduleId,
    ) -> ScheduleInsightsResult<ScheduleInsight> {
        let schedule = self
            .schedules
            .find_by_id(schedule_id)
            .await?
            .ok_or_else(|| ScheduleInsightsError::ScheduleNotFound(schedule_id))?;
        let land = self
            .lands
            .find_by_id(schedule.land_id())
            .await?
            .ok_or_else(|| ScheduleInsightsError::LandNotFound(schedule.land_id()))?;

        let input = YieldInput::for_schedule(&schedule, land.size_acres());
        let estimate = self.estimator.estimate(&input);
        let insight = ScheduleInsight::new(&schedule, estimate);
        debug!(
            schedule_id = %schedule_id,
            progress = insight.progress.percent(),
            stage = %insight.growth_stage,
            "schedule insight derived"
        );
        Ok(insight)
    }

    /// Summarises a land and its active crops.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleInsightsError::LandNotFound`] for unknown lands and
    /// repository errors otherwise.
    pub async fn land_overview(&self, land_id: LandId) -> ScheduleInsightsResult<LandOverview> {
        let land = self
            .lands
            .find_by_id(land_id)
            .await?
            .ok_or_else(|| ScheduleInsightsError::LandNotFound(land_id))?;
        let active = self.schedules.list_active_by_land(land_id).await?;

        Ok(LandOverview {
            land_id,
            land_name: land.name().to_owned(),
            size_acres: land.size_acres(),
            active_crops: active.iter().map(CropOverview::from).collect(),
        })
    }
}
