//! Domain model for crop schedules, activation policies, disease task
//! classification, and crop-planning history.

mod activation;
pub mod disease;
mod error;
mod ids;
mod insights;
mod payload;
mod planning;
mod schedule;
mod task;

pub use activation::ActivationPolicy;
pub use disease::{DISEASE_PHASE, DiseaseTaskKind};
pub use error::{
    ParseActivationPolicyError, ParsePriorityError, ParseSeasonError, ParseTaskActionError,
    ScheduleDomainError,
};
pub use ids::{CropName, IdempotencyToken, PlanningRecordId, ScheduleId};
pub use insights::{
    CropOverview, GrowthStage, LandOverview, RiskLevel, ScheduleInsight, ScheduleProgress,
    YieldBand, YieldEstimate, YieldInput, health_score,
};
pub use payload::{GeneratedTask, parse_generated_tasks};
pub use planning::{CropSuggestion, PersistedPlanningRecordData, PlanningRecord, Season};
pub use schedule::{
    CropSchedule, Diagnosis, DiseaseInsertion, PersistedScheduleData, PlanType, ScheduleDraft,
};
pub use task::{Priority, Task, TaskAction, TaskStatus};
