//! Read models derived from schedules on demand.
//!
//! Nothing here is stored: progress, stage, and health are recomputed from
//! the task list every time they are asked for.

use super::{CropName, CropSchedule, PlanType, ScheduleId, Task};
use crate::land::domain::LandId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task counts for a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScheduleProgress {
    /// Number of tasks.
    pub total: u32,
    /// Completed tasks.
    pub completed: u32,
    /// Skipped tasks.
    pub skipped: u32,
    /// Unresolved tasks.
    pub pending: u32,
}

impl ScheduleProgress {
    /// Counts task states.
    #[must_use]
    pub fn of(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut progress, task| {
            progress.total = progress.total.saturating_add(1);
            let status = task.status();
            if status.is_completed() {
                progress.completed = progress.completed.saturating_add(1);
            } else if status.is_skipped() {
                progress.skipped = progress.skipped.saturating_add(1);
            } else {
                progress.pending = progress.pending.saturating_add(1);
            }
            progress
        })
    }

    /// Returns the number of completed or skipped tasks.
    #[must_use]
    pub const fn resolved(&self) -> u32 {
        self.completed.saturating_add(self.skipped)
    }

    /// Returns resolved / total in `0.0..=1.0`; zero for an empty list.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "progress is reported as a fraction"
    )]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.resolved()) / f64::from(self.total)
    }

    /// Returns resolved tasks as a whole percentage, rounded down.
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent_of(self.resolved(), self.total)
    }

    /// Returns completed tasks as a whole percentage, rounded down.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        percent_of(self.completed, self.total)
    }
}

fn percent_of(part: u32, total: u32) -> u8 {
    let scaled = u64::from(part).saturating_mul(100);
    let percent = scaled.checked_div(u64::from(total)).unwrap_or(0);
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Crop growth stage estimated from days planted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    /// Day 0.
    JustPlanted,
    /// Days 1 to 7.
    Germination,
    /// Days 8 to 21.
    VegetativeGrowth,
    /// Days 22 to 45.
    Flowering,
    /// Days 46 to 90.
    Fruiting,
    /// Past day 90.
    HarvestReady,
}

impl GrowthStage {
    /// Returns the stage for a number of days planted.
    #[must_use]
    pub const fn from_days_planted(days: u32) -> Self {
        match days {
            0 => Self::JustPlanted,
            1..=7 => Self::Germination,
            8..=21 => Self::VegetativeGrowth,
            22..=45 => Self::Flowering,
            46..=90 => Self::Fruiting,
            _ => Self::HarvestReady,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::JustPlanted => "Just Planted",
            Self::Germination => "Germination",
            Self::VegetativeGrowth => "Vegetative Growth",
            Self::Flowering => "Flowering",
            Self::Fruiting => "Fruiting",
            Self::HarvestReady => "Harvest Ready",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Crop health score (45 to 95) from the share of completed tasks.
#[must_use]
pub fn health_score(progress: &ScheduleProgress) -> u8 {
    match progress.completion_percent() {
        90.. => 95,
        80..=89 => 85,
        70..=79 => 75,
        60..=69 => 65,
        50..=59 => 55,
        _ => 45,
    }
}

/// Risk of yield loss derived from the health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Health 85 or above.
    Low,
    /// Health 65 to 84.
    Moderate,
    /// Health below 65.
    High,
}

impl RiskLevel {
    /// Returns the risk level for a health score.
    #[must_use]
    pub const fn from_health_score(score: u8) -> Self {
        match score {
            85.. => Self::Low,
            65..=84 => Self::Moderate,
            _ => Self::High,
        }
    }

    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs handed to a yield estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldInput {
    /// Crop grown.
    pub crop_name: CropName,
    /// Land size in acres.
    pub acres: f64,
    /// Health score, 45 to 95.
    pub health_score: u8,
    /// Resolved task fraction, 0 to 1.
    pub progress_fraction: f64,
    /// Risk level derived from health.
    pub risk: RiskLevel,
}

impl YieldInput {
    /// Collects estimator inputs for a schedule grown on `acres`.
    #[must_use]
    pub fn for_schedule(schedule: &CropSchedule, acres: f64) -> Self {
        let progress = schedule.progress();
        let health = health_score(&progress);
        Self {
            crop_name: schedule.crop_name().clone(),
            acres,
            health_score: health,
            progress_fraction: progress.fraction(),
            risk: RiskLevel::from_health_score(health),
        }
    }
}

/// Lower and upper yield bounds in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldBand {
    /// Pessimistic yield.
    pub min_kg: f64,
    /// Optimistic yield.
    pub max_kg: f64,
}

/// Output of a yield estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldEstimate {
    /// Point estimate in kilograms.
    pub expected_kg: f64,
    /// Range the actual yield is expected to fall in.
    pub band: YieldBand,
}

/// Derived view of one schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleInsight {
    /// Schedule described.
    pub schedule_id: ScheduleId,
    /// Land the crop is grown on.
    pub land_id: LandId,
    /// Crop grown.
    pub crop_name: CropName,
    /// Task counts.
    pub progress: ScheduleProgress,
    /// Earliest pending task.
    pub current_task: Option<Task>,
    /// What to do next, e.g. `Irrigate (Day 3)`.
    pub next_action: String,
    /// Highest day among resolved tasks.
    pub days_planted: u32,
    /// Growth stage for `days_planted`.
    pub growth_stage: GrowthStage,
    /// Health score, 45 to 95.
    pub health_score: u8,
    /// Risk level derived from health.
    pub risk: RiskLevel,
    /// Yield estimate.
    pub yield_estimate: YieldEstimate,
}

impl ScheduleInsight {
    /// Derives the insight for a schedule and a precomputed yield estimate.
    #[must_use]
    pub fn new(schedule: &CropSchedule, yield_estimate: YieldEstimate) -> Self {
        let progress = schedule.progress();
        let health = health_score(&progress);
        let days_planted = schedule.days_planted();
        Self {
            schedule_id: schedule.id(),
            land_id: schedule.land_id(),
            crop_name: schedule.crop_name().clone(),
            progress,
            current_task: schedule.current_task().cloned(),
            next_action: schedule.next_action(),
            days_planted,
            growth_stage: GrowthStage::from_days_planted(days_planted),
            health_score: health,
            risk: RiskLevel::from_health_score(health),
            yield_estimate,
        }
    }
}

/// Summary of one active crop on a land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropOverview {
    /// Active schedule for the crop.
    pub schedule_id: ScheduleId,
    /// Crop grown.
    pub crop_name: CropName,
    /// Why the schedule exists.
    pub plan_type: PlanType,
    /// Resolved tasks as a percentage.
    pub progress_percent: u8,
    /// What to do next.
    pub next_action: String,
    /// Growth stage.
    pub growth_stage: GrowthStage,
}

impl From<&CropSchedule> for CropOverview {
    fn from(schedule: &CropSchedule) -> Self {
        Self {
            schedule_id: schedule.id(),
            crop_name: schedule.crop_name().clone(),
            plan_type: schedule.plan_type(),
            progress_percent: schedule.progress().percent(),
            next_action: schedule.next_action(),
            growth_stage: GrowthStage::from_days_planted(schedule.days_planted()),
        }
    }
}

/// Derived view of a land and its active crops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandOverview {
    /// Land described.
    pub land_id: LandId,
    /// Land display name.
    pub land_name: String,
    /// Land size in acres.
    pub size_acres: f64,
    /// One entry per active schedule, ordered by crop name.
    pub active_crops: Vec<CropOverview>,
}
