//! Service layer for staging, activating, and progressing crop schedules.

use super::ScheduleConfig;
use crate::land::domain::{LandId, SoilType};
use crate::schedule::{
    domain::{
        ActivationPolicy, CropName, CropSchedule, IdempotencyToken, PlanType, PlanningRecordId,
        ScheduleDomainError, ScheduleDraft, ScheduleId, Season, Task, TaskAction,
        parse_generated_tasks,
    },
    ports::{
        ActivationLedger, ActivationLedgerError, ActivationRecord, LedgerClaim,
        ScheduleRepository, ScheduleRepositoryError,
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for staging a generated schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageScheduleRequest {
    land_id: LandId,
    crop_name: String,
    soil_type: SoilType,
    season: Season,
    payload: String,
    start_date: Option<NaiveDate>,
}

impl StageScheduleRequest {
    /// Creates a request from the generator's JSON task list.
    #[must_use]
    pub fn new(
        land_id: LandId,
        crop_name: impl Into<String>,
        soil_type: SoilType,
        season: Season,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            land_id,
            crop_name: crop_name.into(),
            soil_type,
            season,
            payload: payload.into(),
            start_date: None,
        }
    }

    /// Sets the cycle start date; defaults to today.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// Where an activation takes its tasks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActivationSource {
    Latest,
    Schedule(ScheduleId),
    /// A schedule found through a saved plan; the plan identifies the
    /// request.
    SavedPlan {
        record_id: PlanningRecordId,
        schedule_id: ScheduleId,
    },
}

impl ActivationSource {
    const fn schedule_id(self) -> Option<ScheduleId> {
        match self {
            Self::Latest => None,
            Self::Schedule(schedule_id) | Self::SavedPlan { schedule_id, .. } => Some(schedule_id),
        }
    }

    fn fingerprint_key(self) -> String {
        match self {
            Self::Latest => "latest".to_owned(),
            Self::Schedule(schedule_id) => schedule_id.to_string(),
            Self::SavedPlan { record_id, .. } => format!("plan:{record_id}"),
        }
    }
}

/// Request payload for activating a crop schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivateScheduleRequest {
    land_id: LandId,
    crop_name: String,
    policy: ActivationPolicy,
    idempotency_token: String,
    source: ActivationSource,
}

impl ActivateScheduleRequest {
    /// Creates a request activating the latest schedule for a land and
    /// crop.
    #[must_use]
    pub fn new(
        land_id: LandId,
        crop_name: impl Into<String>,
        policy: ActivationPolicy,
        idempotency_token: impl Into<String>,
    ) -> Self {
        Self {
            land_id,
            crop_name: crop_name.into(),
            policy,
            idempotency_token: idempotency_token.into(),
            source: ActivationSource::Latest,
        }
    }

    /// Activates from a specific earlier schedule instead of the latest.
    #[must_use]
    pub const fn with_source(mut self, source_id: ScheduleId) -> Self {
        self.source = ActivationSource::Schedule(source_id);
        self
    }

    /// Activates from a schedule found through a saved plan.
    ///
    /// Retries with the same token are matched on the plan, so they replay
    /// even though a later lookup would find a different schedule.
    #[must_use]
    pub const fn with_saved_plan(
        mut self,
        record_id: PlanningRecordId,
        source_id: ScheduleId,
    ) -> Self {
        self.source = ActivationSource::SavedPlan {
            record_id,
            schedule_id: source_id,
        };
        self
    }
}

/// Result of an activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationOutcome {
    /// The newly active schedule.
    pub schedule: CropSchedule,
    /// Schedules deactivated by this activation.
    pub deactivated: Vec<ScheduleId>,
    /// `true` when the token had already been used and the earlier result
    /// was returned without any new effect.
    pub replayed: bool,
}

/// Service-level errors for schedule lifecycle operations.
#[derive(Debug, Error)]
pub enum ScheduleLifecycleError {
    /// Domain validation or transition failed.
    #[error(transparent)]
    Domain(#[from] ScheduleDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ScheduleRepositoryError),
    /// Idempotency ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] ActivationLedgerError),
    /// The schedule does not exist.
    #[error("schedule not found: {0}")]
    ScheduleNotFound(ScheduleId),
    /// No schedule exists for the land and crop to activate from.
    #[error("no schedule for {crop_name} on land {land_id} to activate")]
    NoScheduleToActivate {
        /// Land requested.
        land_id: LandId,
        /// Crop requested.
        crop_name: CropName,
    },
    /// The requested source schedule belongs to another land or crop.
    #[error("schedule {source_id} does not belong to {crop_name} on land {land_id}")]
    SourceMismatch {
        /// Schedule requested as source.
        source_id: ScheduleId,
        /// Land requested.
        land_id: LandId,
        /// Crop requested.
        crop_name: CropName,
    },
    /// Another activation with the same token is still running.
    #[error("activation with token {0} is already in progress")]
    ActivationInProgress(IdempotencyToken),
    /// The token was already used for a different activation.
    #[error("idempotency token {0} was used for a different request")]
    IdempotencyConflict(IdempotencyToken),
}

/// Result type for schedule lifecycle service operations.
pub type ScheduleLifecycleResult<T> = Result<T, ScheduleLifecycleError>;

/// Schedule lifecycle orchestration service.
#[derive(Clone)]
pub struct ScheduleLifecycleService<R, L, C>
where
    R: ScheduleRepository,
    L: ActivationLedger,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    ledger: Arc<L>,
    clock: Arc<C>,
    config: ScheduleConfig,
}

impl<R, L, C> ScheduleLifecycleService<R, L, C>
where
    R: ScheduleRepository,
    L: ActivationLedger,
    C: Clock + Send + Sync,
{
    /// Creates a new schedule lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        ledger: Arc<L>,
        clock: Arc<C>,
        config: ScheduleConfig,
    ) -> Self {
        Self {
            repository,
            ledger,
            clock,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Validates a generated task list and stores it as an inactive
    /// schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleLifecycleError::Domain`] when the crop name or
    /// payload is invalid and [`ScheduleLifecycleError::Repository`] when
    /// persistence fails.
    pub async fn stage_generated_schedule(
        &self,
        request: StageScheduleRequest,
    ) -> ScheduleLifecycleResult<CropSchedule> {
        let crop_name = CropName::new(request.crop_name)?;
        let tasks = parse_generated_tasks(&request.payload).inspect_err(|err| {
            warn!(
                land_id = %request.land_id,
                crop = %crop_name,
                error = %err,
                "generated schedule rejected"
            );
        })?;
        let draft = ScheduleDraft {
            land_id: request.land_id,
            crop_name,
            soil_type: request.soil_type,
            season: request.season,
            start_date: request
                .start_date
                .unwrap_or_else(|| self.clock.utc().date_naive()),
            plan_type: PlanType::Standard,
            tasks,
            diagnosis: None,
        };
        let schedule = CropSchedule::staged(draft, &*self.clock)?;
        self.repository.store(&schedule).await?;

        info!(
            schedule_id = %schedule.id(),
            land_id = %schedule.land_id(),
            crop = %schedule.crop_name(),
            tasks = schedule.tasks().len(),
            "schedule staged"
        );
        Ok(schedule)
    }

    /// Looks up the latest schedule for an exact land, crop, soil type, and
    /// season, so its progress can be reused instead of generating anew.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleLifecycleError::Domain`] for a blank crop name and
    /// [`ScheduleLifecycleError::Repository`] when lookup fails.
    pub async fn check_existing_schedule(
        &self,
        land_id: LandId,
        crop_name: &str,
        soil_type: &SoilType,
        season: Season,
    ) -> ScheduleLifecycleResult<Option<CropSchedule>> {
        let crop = CropName::new(crop_name)?;
        let existing = self
            .repository
            .find_latest_matching(land_id, &crop, soil_type, season)
            .await?;
        debug!(
            land_id = %land_id,
            crop = %crop,
            found = existing.is_some(),
            "existing schedule lookup"
        );
        Ok(existing)
    }

    /// Activates a schedule for a land and crop under a policy.
    ///
    /// The source is the schedule named by the request or, failing that,
    /// the latest schedule for the land and crop. A new schedule is built
    /// from its tasks and becomes the only active one for the crop.
    /// Repeating a request with the same token within the token lifetime
    /// returns the first result with `replayed` set and changes nothing.
    /// Once the new schedule is stored the activation is reported as done,
    /// even if the ledger then fails to record its result.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleLifecycleError::IdempotencyConflict`] when the
    /// token was used for another request,
    /// [`ScheduleLifecycleError::ActivationInProgress`] while the first
    /// request is still running,
    /// [`ScheduleLifecycleError::NoScheduleToActivate`] when there is
    /// nothing to activate, and repository or ledger errors otherwise.
    pub async fn activate_schedule(
        &self,
        request: ActivateScheduleRequest,
    ) -> ScheduleLifecycleResult<ActivationOutcome> {
        let crop_name = CropName::new(request.crop_name)?;
        let token = IdempotencyToken::new(request.idempotency_token)?;
        let fingerprint =
            activation_fingerprint(request.land_id, &crop_name, &request.policy, request.source);

        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.config.idempotency_ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        match self
            .ledger
            .claim(&token, &fingerprint, now, expires_at)
            .await?
        {
            LedgerClaim::Acquired => {}
            LedgerClaim::Replay(record) => {
                debug!(
                    token = %token,
                    schedule_id = %record.schedule.id(),
                    "activation replayed"
                );
                let ActivationRecord {
                    schedule,
                    deactivated,
                } = *record;
                return Ok(ActivationOutcome {
                    schedule,
                    deactivated,
                    replayed: true,
                });
            }
            LedgerClaim::InFlight => {
                warn!(token = %token, "activation already in progress");
                return Err(ScheduleLifecycleError::ActivationInProgress(token));
            }
            LedgerClaim::Mismatch => {
                warn!(token = %token, "idempotency token reused for a different request");
                return Err(ScheduleLifecycleError::IdempotencyConflict(token));
            }
        }

        let result = self
            .perform_activation(
                request.land_id,
                &crop_name,
                &request.policy,
                request.source.schedule_id(),
            )
            .await;
        match result {
            Ok(record) => {
                if let Err(complete_err) = self.ledger.complete(&token, &record).await {
                    warn!(
                        token = %token,
                        schedule_id = %record.schedule.id(),
                        error = %complete_err,
                        "activation committed but its token could not be completed"
                    );
                }
                info!(
                    schedule_id = %record.schedule.id(),
                    land_id = %request.land_id,
                    crop = %crop_name,
                    policy = %request.policy,
                    deactivated = record.deactivated.len(),
                    "schedule activated"
                );
                Ok(ActivationOutcome {
                    schedule: record.schedule,
                    deactivated: record.deactivated,
                    replayed: false,
                })
            }
            Err(err) => {
                if let Err(release_err) = self.ledger.release(&token).await {
                    warn!(
                        token = %token,
                        error = %release_err,
                        "failed to release activation token"
                    );
                }
                Err(err)
            }
        }
    }

    async fn perform_activation(
        &self,
        land_id: LandId,
        crop_name: &CropName,
        policy: &ActivationPolicy,
        source_id: Option<ScheduleId>,
    ) -> ScheduleLifecycleResult<ActivationRecord> {
        let source = match source_id {
            Some(id) => {
                let schedule = self
                    .repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| ScheduleLifecycleError::ScheduleNotFound(id))?;
                if schedule.land_id() != land_id || schedule.crop_name() != crop_name {
                    return Err(ScheduleLifecycleError::SourceMismatch {
                        source_id: id,
                        land_id,
                        crop_name: crop_name.clone(),
                    });
                }
                schedule
            }
            None => self
                .repository
                .find_latest_for_crop(land_id, crop_name)
                .await?
                .ok_or_else(|| ScheduleLifecycleError::NoScheduleToActivate {
                    land_id,
                    crop_name: crop_name.clone(),
                })?,
        };

        let schedule = CropSchedule::activated_from(&source, policy, &*self.clock);
        let deactivated = self.repository.activate(&schedule).await?;
        Ok(ActivationRecord {
            schedule,
            deactivated,
        })
    }

    /// Completes or skips the task at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleLifecycleError::ScheduleNotFound`] for unknown
    /// schedules, [`ScheduleLifecycleError::Domain`] when the transition is
    /// not allowed, and [`ScheduleLifecycleError::Repository`] with
    /// [`ScheduleRepositoryError::VersionConflict`] when a concurrent
    /// write won.
    pub async fn apply_task_action(
        &self,
        schedule_id: ScheduleId,
        index: usize,
        action: TaskAction,
    ) -> ScheduleLifecycleResult<Task> {
        let mut schedule = self.load(schedule_id).await?;
        let expected_version = schedule.version();
        let task = schedule
            .apply_action(
                index,
                action,
                self.config.skip_requires_sequence,
                &*self.clock,
            )
            .inspect_err(|err| {
                warn!(
                    schedule_id = %schedule_id,
                    task_index = index,
                    action = %action,
                    error = %err,
                    "task action rejected"
                );
            })?;
        self.repository.update(&schedule, expected_version).await?;

        info!(
            schedule_id = %schedule_id,
            task_index = index,
            action = %action,
            progress = schedule.progress().percent(),
            "task resolved"
        );
        Ok(task)
    }

    /// Completes or skips the first task with the given label and day.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::TaskLabelNotFound`] when no task
    /// matches, and the errors of [`Self::apply_task_action`] otherwise.
    pub async fn apply_task_action_by_label(
        &self,
        schedule_id: ScheduleId,
        label: &str,
        day: u32,
        action: TaskAction,
    ) -> ScheduleLifecycleResult<Task> {
        let schedule = self.load(schedule_id).await?;
        let index = schedule.find_task_index(label, day).ok_or_else(|| {
            ScheduleDomainError::TaskLabelNotFound {
                label: label.trim().to_owned(),
                day,
            }
        })?;
        self.apply_task_action(schedule_id, index, action).await
    }

    /// Retrieves a schedule by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleLifecycleError::Repository`] when lookup fails.
    pub async fn find_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> ScheduleLifecycleResult<Option<CropSchedule>> {
        Ok(self.repository.find_by_id(schedule_id).await?)
    }

    /// Retrieves the active schedule for a land and crop.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleLifecycleError::Domain`] for a blank crop name and
    /// [`ScheduleLifecycleError::Repository`] when lookup fails.
    pub async fn active_schedule(
        &self,
        land_id: LandId,
        crop_name: &str,
    ) -> ScheduleLifecycleResult<Option<CropSchedule>> {
        let crop = CropName::new(crop_name)?;
        Ok(self.repository.find_active(land_id, &crop).await?)
    }

    /// Lists every schedule of a land, active or not, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleLifecycleError::Repository`] when lookup fails.
    pub async fn list_for_land(
        &self,
        land_id: LandId,
    ) -> ScheduleLifecycleResult<Vec<CropSchedule>> {
        Ok(self.repository.list_by_land(land_id).await?)
    }

    async fn load(&self, schedule_id: ScheduleId) -> ScheduleLifecycleResult<CropSchedule> {
        self.repository
            .find_by_id(schedule_id)
            .await?
            .ok_or_else(|| ScheduleLifecycleError::ScheduleNotFound(schedule_id))
    }
}

fn activation_fingerprint(
    land_id: LandId,
    crop_name: &CropName,
    policy: &ActivationPolicy,
    source: ActivationSource,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(land_id.to_string().as_bytes());
    hasher.update(b"\x1f");
    hasher.update(crop_name.as_str().as_bytes());
    hasher.update(b"\x1f");
    hasher.update(policy.fingerprint_key().as_bytes());
    hasher.update(b"\x1f");
    hasher.update(source.fingerprint_key().as_bytes());
    format!("{:x}", hasher.finalize())
}
