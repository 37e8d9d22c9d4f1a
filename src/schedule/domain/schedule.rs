//! Crop schedule aggregate root: the ordered task list for one crop cycle.

use super::{
    ActivationPolicy, CropName, ScheduleDomainError, ScheduleId, ScheduleProgress, Season, Task,
    TaskAction, disease,
};
use crate::land::domain::{LandId, SoilType};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Why a schedule was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    /// A regular crop cycle.
    Standard,
    /// A plan created to treat a diagnosed disease.
    DiseaseManagement,
}

impl PlanType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::DiseaseManagement => "disease_management",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where disease-management tasks are placed in a running schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseInsertion {
    /// Insert before the current task so the new tasks are due next.
    Preempt,
    /// Append after every existing task.
    Append,
}

/// Diagnosis attached to a disease-management plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    disease: String,
    confidence_percent: u8,
}

impl Diagnosis {
    /// Creates a diagnosis; confidence is capped at 100.
    #[must_use]
    pub fn new(disease: impl Into<String>, confidence_percent: u8) -> Self {
        Self {
            disease: disease.into(),
            confidence_percent: confidence_percent.min(100),
        }
    }

    /// Returns the diagnosed disease.
    #[must_use]
    pub fn disease(&self) -> &str {
        &self.disease
    }

    /// Returns the diagnosis confidence in percent.
    #[must_use]
    pub const fn confidence_percent(&self) -> u8 {
        self.confidence_percent
    }
}

/// Parameter object for creating a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    /// Land the crop is grown on.
    pub land_id: LandId,
    /// Crop grown.
    pub crop_name: CropName,
    /// Soil type the schedule was planned for.
    pub soil_type: SoilType,
    /// Season the schedule was planned for.
    pub season: Season,
    /// First day of the cycle.
    pub start_date: NaiveDate,
    /// Why the schedule exists.
    pub plan_type: PlanType,
    /// Ordered tasks.
    pub tasks: Vec<Task>,
    /// Diagnosis for disease-management plans.
    pub diagnosis: Option<Diagnosis>,
}

/// Crop schedule aggregate root.
///
/// Schedules are never deleted: replacing one deactivates it and keeps it
/// as history. Every mutation bumps [`CropSchedule::version`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSchedule {
    id: ScheduleId,
    land_id: LandId,
    crop_name: CropName,
    soil_type: SoilType,
    season: Season,
    plan_type: PlanType,
    start_date: NaiveDate,
    active: bool,
    tasks: Vec<Task>,
    diagnosis: Option<Diagnosis>,
    source_schedule_id: Option<ScheduleId>,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedScheduleData {
    /// Persisted schedule identifier.
    pub id: ScheduleId,
    /// Persisted land.
    pub land_id: LandId,
    /// Persisted crop.
    pub crop_name: CropName,
    /// Persisted soil type.
    pub soil_type: SoilType,
    /// Persisted season.
    pub season: Season,
    /// Persisted plan type.
    pub plan_type: PlanType,
    /// Persisted start date.
    pub start_date: NaiveDate,
    /// Persisted activity flag.
    pub active: bool,
    /// Persisted tasks.
    pub tasks: Vec<Task>,
    /// Persisted diagnosis.
    pub diagnosis: Option<Diagnosis>,
    /// Schedule this one was activated from.
    pub source_schedule_id: Option<ScheduleId>,
    /// Persisted version.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CropSchedule {
    /// Creates an inactive schedule awaiting activation.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::EmptySchedule`] when the draft has no
    /// tasks.
    pub fn staged(draft: ScheduleDraft, clock: &impl Clock) -> Result<Self, ScheduleDomainError> {
        Self::from_draft(draft, false, clock)
    }

    /// Creates a schedule that is active from the start.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::EmptySchedule`] when the draft has no
    /// tasks.
    pub fn launched(draft: ScheduleDraft, clock: &impl Clock) -> Result<Self, ScheduleDomainError> {
        Self::from_draft(draft, true, clock)
    }

    fn from_draft(
        draft: ScheduleDraft,
        active: bool,
        clock: &impl Clock,
    ) -> Result<Self, ScheduleDomainError> {
        if draft.tasks.is_empty() {
            return Err(ScheduleDomainError::EmptySchedule);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: ScheduleId::new(),
            land_id: draft.land_id,
            crop_name: draft.crop_name,
            soil_type: draft.soil_type,
            season: draft.season,
            plan_type: draft.plan_type,
            start_date: draft.start_date,
            active,
            tasks: draft.tasks,
            diagnosis: draft.diagnosis,
            source_schedule_id: None,
            version: 1,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Creates a new active schedule from an existing one under a policy.
    ///
    /// The source is left untouched. A policy that resets all progress
    /// restarts the cycle today; otherwise the source start date is kept.
    #[must_use]
    pub fn activated_from(source: &Self, policy: &ActivationPolicy, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let start_date = if policy.resets_progress() {
            timestamp.date_naive()
        } else {
            source.start_date
        };
        Self {
            id: ScheduleId::new(),
            land_id: source.land_id,
            crop_name: source.crop_name.clone(),
            soil_type: source.soil_type.clone(),
            season: source.season,
            plan_type: source.plan_type,
            start_date,
            active: true,
            tasks: policy.apply(&source.tasks),
            diagnosis: source.diagnosis.clone(),
            source_schedule_id: Some(source.id),
            version: 1,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a schedule from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedScheduleData) -> Self {
        Self {
            id: data.id,
            land_id: data.land_id,
            crop_name: data.crop_name,
            soil_type: data.soil_type,
            season: data.season,
            plan_type: data.plan_type,
            start_date: data.start_date,
            active: data.active,
            tasks: data.tasks,
            diagnosis: data.diagnosis,
            source_schedule_id: data.source_schedule_id,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the schedule identifier.
    #[must_use]
    pub const fn id(&self) -> ScheduleId {
        self.id
    }

    /// Returns the land the crop is grown on.
    #[must_use]
    pub const fn land_id(&self) -> LandId {
        self.land_id
    }

    /// Returns the crop name.
    #[must_use]
    pub const fn crop_name(&self) -> &CropName {
        &self.crop_name
    }

    /// Returns the soil type the schedule was planned for.
    #[must_use]
    pub const fn soil_type(&self) -> &SoilType {
        &self.soil_type
    }

    /// Returns the season the schedule was planned for.
    #[must_use]
    pub const fn season(&self) -> Season {
        self.season
    }

    /// Returns the plan type.
    #[must_use]
    pub const fn plan_type(&self) -> PlanType {
        self.plan_type
    }

    /// Returns the first day of the cycle.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns `true` when this schedule governs its crop's progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the ordered tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the diagnosis of a disease-management plan.
    #[must_use]
    pub const fn diagnosis(&self) -> Option<&Diagnosis> {
        self.diagnosis.as_ref()
    }

    /// Returns the schedule this one was activated from.
    #[must_use]
    pub const fn source_schedule_id(&self) -> Option<ScheduleId> {
        self.source_schedule_id
    }

    /// Returns the optimistic-concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the position of the earliest pending task.
    #[must_use]
    pub fn current_task_index(&self) -> Option<usize> {
        self.tasks.iter().position(Task::is_pending)
    }

    /// Returns the earliest pending task.
    #[must_use]
    pub fn current_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|task| task.is_pending())
    }

    /// Returns `true` once no task is pending.
    #[must_use]
    pub fn is_fully_resolved(&self) -> bool {
        self.current_task_index().is_none()
    }

    /// Returns progress counts, computed from the tasks on every call.
    #[must_use]
    pub fn progress(&self) -> ScheduleProgress {
        ScheduleProgress::of(&self.tasks)
    }

    /// Finds the position of the first task with the given label and day.
    #[must_use]
    pub fn find_task_index(&self, label: &str, day: u32) -> Option<usize> {
        let wanted = label.trim();
        self.tasks
            .iter()
            .position(|task| task.day() == day && task.label() == wanted)
    }

    /// Returns the highest day among resolved tasks, or zero.
    #[must_use]
    pub fn days_planted(&self) -> u32 {
        self.tasks
            .iter()
            .filter(|task| task.status().is_resolved())
            .map(Task::day)
            .max()
            .unwrap_or(0)
    }

    /// Returns a one-line description of what to do next.
    #[must_use]
    pub fn next_action(&self) -> String {
        self.current_task().map_or_else(
            || "All tasks completed!".to_owned(),
            |task| format!("{} (Day {})", task.label(), task.day()),
        )
    }

    /// Completes or skips the task at `index`.
    ///
    /// Completing requires every earlier task to be resolved. Skipping is
    /// only held to the same rule when `gate_skips` is set. Resolved tasks
    /// are terminal. On success only the addressed task changes and the
    /// updated task is returned.
    ///
    /// # Errors
    ///
    /// Returns, in order of precedence,
    /// [`ScheduleDomainError::ScheduleInactive`],
    /// [`ScheduleDomainError::TaskNotFound`],
    /// [`ScheduleDomainError::TaskAlreadyResolved`], or
    /// [`ScheduleDomainError::OutOfSequence`].
    pub fn apply_action(
        &mut self,
        index: usize,
        action: TaskAction,
        gate_skips: bool,
        clock: &impl Clock,
    ) -> Result<Task, ScheduleDomainError> {
        if !self.active {
            return Err(ScheduleDomainError::ScheduleInactive(self.id));
        }
        let len = self.tasks.len();
        let is_pending = self
            .tasks
            .get(index)
            .map(Task::is_pending)
            .ok_or(ScheduleDomainError::TaskNotFound { index, len })?;
        if !is_pending {
            return Err(ScheduleDomainError::TaskAlreadyResolved { index });
        }

        let gated = match action {
            TaskAction::Done => true,
            TaskAction::Skip => gate_skips,
        };
        if gated
            && let Some(blocking_index) = self.current_task_index()
            && blocking_index < index
        {
            return Err(ScheduleDomainError::OutOfSequence {
                index,
                blocking_index,
            });
        }

        let timestamp = clock.utc();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(ScheduleDomainError::TaskNotFound { index, len })?;
        task.resolve(action, timestamp);
        let resolved = task.clone();
        self.touch(timestamp);
        Ok(resolved)
    }

    /// Splices disease-management tasks built from recommendations into
    /// the schedule and returns the positions they occupy.
    ///
    /// With [`DiseaseInsertion::Preempt`] the tasks go immediately before
    /// the current task and their days start at its day, so they become
    /// the next tasks due. With [`DiseaseInsertion::Append`] they go after
    /// every existing task with days counting from 1.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::ScheduleInactive`] for inactive
    /// schedules and the recommendation validation errors otherwise.
    pub fn integrate_recommendations(
        &mut self,
        recommendations: &[String],
        insertion: DiseaseInsertion,
        clock: &impl Clock,
    ) -> Result<Range<usize>, ScheduleDomainError> {
        if !self.active {
            return Err(ScheduleDomainError::ScheduleInactive(self.id));
        }
        let (position, first_day) = match (insertion, self.current_task_index()) {
            (DiseaseInsertion::Preempt, Some(current)) => (
                current,
                self.tasks.get(current).map_or(1, Task::day),
            ),
            (DiseaseInsertion::Preempt, None) => (
                self.tasks.len(),
                self.tasks
                    .iter()
                    .map(Task::day)
                    .max()
                    .map_or(1, |day| day.saturating_add(1)),
            ),
            (DiseaseInsertion::Append, _) => (self.tasks.len(), 1),
        };

        let inserted = disease::tasks_from_recommendations(recommendations, first_day)?;
        let end = position.saturating_add(inserted.len());
        self.tasks.splice(position..position, inserted);
        self.touch(clock.utc());
        Ok(position..end)
    }

    /// Marks the schedule as no longer active.
    pub const fn deactivate(&mut self, at: DateTime<Utc>) {
        if self.active {
            self.active = false;
            self.touch(at);
        }
    }

    const fn touch(&mut self, at: DateTime<Utc>) {
        self.version = self.version.saturating_add(1);
        self.updated_at = at;
    }
}
