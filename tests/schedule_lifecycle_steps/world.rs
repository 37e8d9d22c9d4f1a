//! Shared world state for crop schedule BDD scenarios.

use std::sync::Arc;

use furrow::land::{adapters::memory::InMemoryLandRepository, domain::LandId};
use furrow::schedule::{
    adapters::memory::{InMemoryActivationLedger, InMemoryScheduleRepository},
    domain::{CropSchedule, Task},
    services::{
        ActivationOutcome, DiseaseIntegrationService, ScheduleConfig, ScheduleLifecycleError,
        ScheduleLifecycleService,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycleService =
    ScheduleLifecycleService<InMemoryScheduleRepository, InMemoryActivationLedger, DefaultClock>;

/// Disease service type used by the BDD world.
pub type TestDiseaseService =
    DiseaseIntegrationService<InMemoryScheduleRepository, InMemoryLandRepository, DefaultClock>;

/// Generated task list used by every scenario.
pub const GENERATED_TASKS: &str = r#"[
    {"day": 0, "task": "Prepare beds", "phase": "Land Preparation", "priority": "High"},
    {"day": 3, "task": "Sow seeds", "phase": "Planting", "priority": "High"},
    {"day": 10, "task": "First irrigation", "phase": "Growth", "priority": "Medium"},
    {"day": 30, "task": "Side dressing", "phase": "Growth", "priority": "Low"}
]"#;

/// Scenario world for crop schedule behaviour tests.
pub struct ScheduleWorld {
    pub lands: Arc<InMemoryLandRepository>,
    pub lifecycle: TestLifecycleService,
    pub disease: TestDiseaseService,
    pub land_id: Option<LandId>,
    pub active: Option<CropSchedule>,
    pub last_activation: Option<ActivationOutcome>,
    pub last_action: Option<Result<Task, ScheduleLifecycleError>>,
}

impl ScheduleWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let lands = Arc::new(InMemoryLandRepository::new());
        let schedules = Arc::new(InMemoryScheduleRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            lifecycle: ScheduleLifecycleService::new(
                Arc::clone(&schedules),
                Arc::new(InMemoryActivationLedger::new()),
                Arc::clone(&clock),
                ScheduleConfig::default(),
            ),
            disease: DiseaseIntegrationService::new(
                schedules,
                Arc::clone(&lands),
                clock,
                ScheduleConfig::default(),
            ),
            lands,
            land_id: None,
            active: None,
            last_activation: None,
            last_action: None,
        }
    }

    /// Returns the registered land.
    ///
    /// # Errors
    ///
    /// Returns an error if no land was registered.
    pub fn land_id(&self) -> Result<LandId, eyre::Report> {
        self.land_id
            .ok_or_else(|| eyre::eyre!("missing registered land in scenario world"))
    }

    /// Returns the most recently activated schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was activated.
    pub fn active(&self) -> Result<&CropSchedule, eyre::Report> {
        self.active
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing active schedule in scenario world"))
    }
}

impl Default for ScheduleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ScheduleWorld {
    ScheduleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
