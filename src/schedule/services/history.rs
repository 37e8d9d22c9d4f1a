//! Service layer for saving crop plans and replaying them without a new
//! generation round trip.

use super::{
    ActivateScheduleRequest, ActivationOutcome, ScheduleLifecycleError, ScheduleLifecycleService,
};
use crate::land::domain::{LandId, SoilType};
use crate::schedule::{
    domain::{
        ActivationPolicy, CropName, CropSuggestion, PlanningRecord, PlanningRecordId,
        ScheduleDomainError, Season,
    },
    ports::{
        ActivationLedger, PlanningRecordRepository, PlanningRecordRepositoryError,
        ScheduleRepository,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for saving a planning session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPlanRequest {
    land_id: LandId,
    soil_type: SoilType,
    season: Season,
    suggestions: Vec<CropSuggestion>,
}

impl RecordPlanRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        land_id: LandId,
        soil_type: SoilType,
        season: Season,
        suggestions: impl IntoIterator<Item = CropSuggestion>,
    ) -> Self {
        Self {
            land_id,
            soil_type,
            season,
            suggestions: suggestions.into_iter().collect(),
        }
    }
}

/// Request payload for reusing a crop from a saved plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReusePlanRequest {
    record_id: PlanningRecordId,
    crop_name: String,
    policy: ActivationPolicy,
    idempotency_token: String,
}

impl ReusePlanRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        record_id: PlanningRecordId,
        crop_name: impl Into<String>,
        policy: ActivationPolicy,
        idempotency_token: impl Into<String>,
    ) -> Self {
        Self {
            record_id,
            crop_name: crop_name.into(),
            policy,
            idempotency_token: idempotency_token.into(),
        }
    }
}

/// What the caller must generate when no earlier schedule can be reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Land to plan for.
    pub land_id: LandId,
    /// Crop to plan.
    pub crop_name: CropName,
    /// Soil type recorded with the plan.
    pub soil_type: SoilType,
    /// Season recorded with the plan.
    pub season: Season,
    /// The saved suggestion for the crop.
    pub suggestion: CropSuggestion,
}

/// Result of reusing a saved plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReuseOutcome {
    /// An earlier schedule was re-activated under the requested policy.
    Activated(ActivationOutcome),
    /// No earlier schedule matches; a schedule must be generated and
    /// staged before it can be activated.
    GenerationRequired(GenerationRequest),
}

/// Service-level errors for historical reuse.
#[derive(Debug, Error)]
pub enum HistoricalReuseError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ScheduleDomainError),
    /// Planning record repository operation failed.
    #[error(transparent)]
    Records(#[from] PlanningRecordRepositoryError),
    /// Activation failed.
    #[error(transparent)]
    Lifecycle(#[from] ScheduleLifecycleError),
    /// The planning record does not exist.
    #[error("planning record not found: {0}")]
    RecordNotFound(PlanningRecordId),
    /// The crop was not among the record's suggestions.
    #[error("crop {crop_name} is not part of planning record {record_id}")]
    CropNotInPlan {
        /// Record consulted.
        record_id: PlanningRecordId,
        /// Crop requested.
        crop_name: CropName,
    },
}

/// Result type for historical reuse service operations.
pub type HistoricalReuseResult<T> = Result<T, HistoricalReuseError>;

/// Historical plan reuse orchestration service.
pub struct HistoricalReuseService<R, L, P, C>
where
    R: ScheduleRepository,
    L: ActivationLedger,
    P: PlanningRecordRepository,
    C: Clock + Send + Sync,
{
    lifecycle: ScheduleLifecycleService<R, L, C>,
    records: Arc<P>,
    clock: Arc<C>,
}

impl<R, L, P, C> HistoricalReuseService<R, L, P, C>
where
    R: ScheduleRepository,
    L: ActivationLedger,
    P: PlanningRecordRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new historical reuse service.
    #[must_use]
    pub const fn new(
        lifecycle: ScheduleLifecycleService<R, L, C>,
        records: Arc<P>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            lifecycle,
            records,
            clock,
        }
    }

    /// Saves the outcome of a planning session.
    ///
    /// # Errors
    ///
    /// Returns [`HistoricalReuseError::Domain`] when no crops were
    /// suggested and [`HistoricalReuseError::Records`] when persistence
    /// fails.
    pub async fn record_plan(
        &self,
        request: RecordPlanRequest,
    ) -> HistoricalReuseResult<PlanningRecord> {
        let record = PlanningRecord::new(
            request.land_id,
            request.soil_type,
            request.season,
            request.suggestions,
            &*self.clock,
        )?;
        self.records.store(&record).await?;
        info!(
            record_id = %record.id(),
            land_id = %record.land_id(),
            suggestions = record.suggestions().len(),
            "planning record saved"
        );
        Ok(record)
    }

    /// Lists the saved plans of a land, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HistoricalReuseError::Records`] when lookup fails.
    pub async fn load_historical_plans(
        &self,
        land_id: LandId,
    ) -> HistoricalReuseResult<Vec<PlanningRecord>> {
        Ok(self.records.list_by_land(land_id).await?)
    }

    /// Reuses a crop from a saved plan.
    ///
    /// If a schedule exists for the plan's land, the crop, and the plan's
    /// soil type and season, it is re-activated under the requested policy.
    /// Otherwise the caller is told what to generate. No generation is ever
    /// triggered from here.
    ///
    /// # Errors
    ///
    /// Returns [`HistoricalReuseError::RecordNotFound`] or
    /// [`HistoricalReuseError::CropNotInPlan`] for unknown inputs and
    /// [`HistoricalReuseError::Lifecycle`] when the activation fails.
    pub async fn reuse(&self, request: ReusePlanRequest) -> HistoricalReuseResult<ReuseOutcome> {
        let ReusePlanRequest {
            record_id,
            crop_name,
            policy,
            idempotency_token,
        } = request;
        let record = self
            .records
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| HistoricalReuseError::RecordNotFound(record_id))?;
        let requested = CropName::new(crop_name)?;
        let suggestion = record
            .suggestion(&requested)
            .cloned()
            .ok_or_else(|| HistoricalReuseError::CropNotInPlan {
                record_id,
                crop_name: requested,
            })?;
        let crop = CropName::new(suggestion.name.as_str())?;

        let existing = self
            .lifecycle
            .check_existing_schedule(
                record.land_id(),
                crop.as_str(),
                record.soil_type(),
                record.season(),
            )
            .await?;
        let Some(source) = existing else {
            debug!(
                record_id = %record_id,
                crop = %crop,
                "no schedule to reuse, generation required"
            );
            return Ok(ReuseOutcome::GenerationRequired(GenerationRequest {
                land_id: record.land_id(),
                crop_name: crop,
                soil_type: record.soil_type().clone(),
                season: record.season(),
                suggestion,
            }));
        };

        let activation = ActivateScheduleRequest::new(
            record.land_id(),
            crop.as_str(),
            policy,
            idempotency_token,
        )
        .with_saved_plan(record_id, source.id());
        let outcome = self.lifecycle.activate_schedule(activation).await?;
        info!(
            record_id = %record_id,
            source_id = %source.id(),
            schedule_id = %outcome.schedule.id(),
            "saved plan reused"
        );
        Ok(ReuseOutcome::Activated(outcome))
    }
}
