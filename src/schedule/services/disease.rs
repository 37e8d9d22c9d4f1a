//! Service layer for splicing disease-management tasks into schedules.

use super::ScheduleConfig;
use crate::land::{
    domain::LandId,
    ports::{LandRepository, LandRepositoryError},
};
use crate::schedule::{
    domain::{
        CropName, CropSchedule, Diagnosis, PlanType, ScheduleDomainError, ScheduleDraft,
        ScheduleId, Season, disease,
    },
    ports::{ScheduleRepository, ScheduleRepositoryError},
};
use mockable::Clock;
use std::ops::Range;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Schedule the recommendations are meant for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiseaseTarget {
    /// A specific schedule.
    Schedule(ScheduleId),
    /// The active schedule for a crop on a land, created if missing.
    Crop {
        /// Land the crop is grown on.
        land_id: LandId,
        /// Crop affected.
        crop_name: String,
    },
}

/// Request payload for integrating disease recommendations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrateDiseaseRequest {
    target: DiseaseTarget,
    recommendations: Vec<String>,
    diagnosis: Option<Diagnosis>,
}

impl IntegrateDiseaseRequest {
    /// Creates a request for the given target and recommendations.
    #[must_use]
    pub fn new(target: DiseaseTarget, recommendations: impl IntoIterator<Item = String>) -> Self {
        Self {
            target,
            recommendations: recommendations.into_iter().collect(),
            diagnosis: None,
        }
    }

    /// Attaches the diagnosis. It is only recorded when a new plan is
    /// created.
    #[must_use]
    pub fn with_diagnosis(mut self, diagnosis: Diagnosis) -> Self {
        self.diagnosis = Some(diagnosis);
        self
    }
}

/// Result of a disease integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseIntegrationOutcome {
    /// The schedule holding the new tasks.
    pub schedule: CropSchedule,
    /// Positions of the new tasks in the schedule.
    pub inserted: Range<usize>,
    /// `true` when a new disease-management plan was created.
    pub created: bool,
}

/// Service-level errors for disease integration.
#[derive(Debug, Error)]
pub enum DiseaseIntegrationError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ScheduleDomainError),
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

/// Result type for disease integration service operations.
pub type DiseaseIntegrationResult<T> = Result<T, DiseaseIntegrationError>;

/// Disease integration orchestration service.
#[derive(Clone)]
pub struct DiseaseIntegrationService<R, L, C>
where
    R: ScheduleRepository,
    L: LandRepository,
    C: Clock + Send + Sync,
{
    schedules: Arc<R>,
    lands: Arc<L>,
    clock: Arc<C>,
    config: ScheduleConfig,
}

impl<R, L, C> DiseaseIntegrationService<R, L, C>
where
    R: ScheduleRepository,
    L: LandRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new disease integration service.
    #[must_use]
    pub const fn new(
        schedules: Arc<R>,
        lands: Arc<L>,
        clock: Arc<C>,
        config: ScheduleConfig,
    ) -> Self {
        Self {
            schedules,
            lands,
            clock,
            config,
        }
    }

    /// Turns recommendations into disease-management tasks and adds them
    /// to the target schedule.
    ///
    /// When the target is a crop with no active schedule, a new active
    /// disease-management plan is created holding only the new tasks.
    /// Recommendations are not deduplicated: sending the same text twice
    /// adds two tasks.
    ///
    /// # Errors
    ///
    /// Returns [`DiseaseIntegrationError::Domain`] for empty or blank
    /// recommendations and inactive target schedules,
    /// [`DiseaseIntegrationError::ScheduleNotFound`] or
    /// [`DiseaseIntegrationError::LandNotFound`] for unknown targets, and
    /// repository errors otherwise, including a version conflict when the
    /// schedule changed concurrently.
    pub async fn integrate(
        &self,
        request: IntegrateDiseaseRequest,
    ) -> DiseaseIntegrationResult<DiseaseIntegrationOutcome> {
        let IntegrateDiseaseRequest {
            target,
            recommendations,
            diagnosis,
        } = request;
        if recommendations.is_empty() {
            return Err(ScheduleDomainError::NoRecommendations.into());
        }

        let schedule = match target {
            DiseaseTarget::Schedule(id) => self
                .schedules
                .find_by_id(id)
                .await?
                .ok_or_else(|| DiseaseIntegrationError::ScheduleNotFound(id))?,
            DiseaseTarget::Crop { land_id, crop_name } => {
                let crop = CropName::new(crop_name)?;
                let Some(active) = self.schedules.find_active(land_id, &crop).await? else {
                    return self
                        .create_plan(land_id, crop, &recommendations, diagnosis)
                        .await;
                };
                active
            }
        };
        self.merge_into(schedule, &recommendations).await
    }

    async fn merge_into(
        &self,
        mut schedule: CropSchedule,
        recommendations: &[String],
    ) -> DiseaseIntegrationResult<DiseaseIntegrationOutcome> {
        let expected_version = schedule.version();
        let inserted = schedule
            .integrate_recommendations(
                recommendations,
                self.config.disease_insertion,
                &*self.clock,
            )
            .inspect_err(|err| {
                warn!(
                    schedule_id = %schedule.id(),
                    error = %err,
                    "disease integration rejected"
                );
            })?;
        self.schedules.update(&schedule, expected_version).await?;

        info!(
            schedule_id = %schedule.id(),
            crop = %schedule.crop_name(),
            first_position = inserted.start,
            added = inserted.len(),
            "disease tasks integrated"
        );
        Ok(DiseaseIntegrationOutcome {
            schedule,
            inserted,
            created: false,
        })
    }

    async fn create_plan(
        &self,
        land_id: LandId,
        crop_name: CropName,
        recommendations: &[String],
        diagnosis: Option<Diagnosis>,
    ) -> DiseaseIntegrationResult<DiseaseIntegrationOutcome> {
        let land = self
            .lands
            .find_by_id(land_id)
            .await?
            .ok_or_else(|| DiseaseIntegrationError::LandNotFound(land_id))?;
        let tasks = disease::tasks_from_recommendations(recommendations, 1)?;
        let today = self.clock.utc().date_naive();
        let draft = ScheduleDraft {
            land_id,
            crop_name,
            soil_type: land.soil_type().clone(),
            season: Season::for_date(today),
            start_date: today,
            plan_type: PlanType::DiseaseManagement,
            tasks,
            diagnosis,
        };
        let schedule = CropSchedule::launched(draft, &*self.clock)?;
        let inserted = 0..schedule.tasks().len();
        self.schedules.activate(&schedule).await?;

        info!(
            schedule_id = %schedule.id(),
            land_id = %land_id,
            crop = %schedule.crop_name(),
            added = inserted.len(),
            "disease management plan created"
        );
        Ok(DiseaseIntegrationOutcome {
            schedule,
            inserted,
            created: true,
        })
    }
}
