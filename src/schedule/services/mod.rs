//! Application services for crop-schedule orchestration.

mod config;
mod disease;
mod history;
mod insights;
mod lifecycle;

pub use config::ScheduleConfig;
pub use disease::{
    DiseaseIntegrationError, DiseaseIntegrationOutcome, DiseaseIntegrationResult,
    DiseaseIntegrationService, DiseaseTarget, IntegrateDiseaseRequest,
};
pub use history::{
    GenerationRequest, HistoricalReuseError, HistoricalReuseResult, HistoricalReuseService,
    RecordPlanRequest, ReuseOutcome, ReusePlanRequest,
};
pub use insights::{ScheduleInsightsError, ScheduleInsightsResult, ScheduleInsightsService};
pub use lifecycle::{
    ActivateScheduleRequest, ActivationOutcome, ScheduleLifecycleError, ScheduleLifecycleResult,
    ScheduleLifecycleService, StageScheduleRequest,
};
