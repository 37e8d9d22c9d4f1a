//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use furrow::land::{
    adapters::memory::InMemoryLandRepository,
    domain::{Coordinate, DrawnShape, Land},
    services::{LandRegistrationService, RegisterLandRequest},
};
use furrow::schedule::{
    adapters::{
        HeuristicYieldEstimator,
        memory::{
            InMemoryActivationLedger, InMemoryPlanningRecordRepository,
            InMemoryScheduleRepository,
        },
    },
    services::{
        DiseaseIntegrationService, HistoricalReuseService, ScheduleConfig,
        ScheduleInsightsService, ScheduleLifecycleService,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Land registration service over in-memory storage.
pub type TestLandService = LandRegistrationService<InMemoryLandRepository, DefaultClock>;
/// Schedule lifecycle service over in-memory storage.
pub type TestLifecycleService =
    ScheduleLifecycleService<InMemoryScheduleRepository, InMemoryActivationLedger, DefaultClock>;
/// Disease integration service over in-memory storage.
pub type TestDiseaseService =
    DiseaseIntegrationService<InMemoryScheduleRepository, InMemoryLandRepository, DefaultClock>;
/// Insight service over in-memory storage.
pub type TestInsightsService = ScheduleInsightsService<
    InMemoryScheduleRepository,
    InMemoryLandRepository,
    HeuristicYieldEstimator,
>;
/// Historical reuse service over in-memory storage.
pub type TestReuseService = HistoricalReuseService<
    InMemoryScheduleRepository,
    InMemoryActivationLedger,
    InMemoryPlanningRecordRepository,
    DefaultClock,
>;

/// Every service wired to one set of in-memory stores.
pub struct Farm {
    /// Land registration.
    pub lands: TestLandService,
    /// Schedule staging, activation, and progression.
    pub lifecycle: TestLifecycleService,
    /// Disease task integration.
    pub disease: TestDiseaseService,
    /// Progress, health, and yield views.
    pub insights: TestInsightsService,
    /// Planning records and reuse.
    pub reuse: TestReuseService,
}

impl Farm {
    /// Wires all services with the given configuration.
    #[must_use]
    pub fn with_config(config: &ScheduleConfig) -> Self {
        let land_repo = Arc::new(InMemoryLandRepository::new());
        let schedules = Arc::new(InMemoryScheduleRepository::new());
        let ledger = Arc::new(InMemoryActivationLedger::new());
        let clock = Arc::new(DefaultClock);
        let lifecycle = || {
            ScheduleLifecycleService::new(
                Arc::clone(&schedules),
                Arc::clone(&ledger),
                Arc::clone(&clock),
                config.clone(),
            )
        };

        Self {
            lands: LandRegistrationService::new(Arc::clone(&land_repo), Arc::clone(&clock)),
            lifecycle: lifecycle(),
            disease: DiseaseIntegrationService::new(
                Arc::clone(&schedules),
                Arc::clone(&land_repo),
                Arc::clone(&clock),
                config.clone(),
            ),
            insights: ScheduleInsightsService::new(
                Arc::clone(&schedules),
                Arc::clone(&land_repo),
                Arc::new(HeuristicYieldEstimator::default()),
            ),
            reuse: HistoricalReuseService::new(
                lifecycle(),
                Arc::new(InMemoryPlanningRecordRepository::new()),
                Arc::clone(&clock),
            ),
        }
    }

    /// Registers a roughly 100 m by 100 m plot near Bengaluru.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn register_plot(&self, name: &str) -> Result<Land, eyre::Report> {
        let request = RegisterLandRequest::new("grower-7", name, "loam", plot_shape());
        Ok(self.lands.register_land(request).await?)
    }
}

/// Provides a farm wired with the default configuration.
#[fixture]
pub fn farm() -> Farm {
    Farm::with_config(&ScheduleConfig::default())
}

/// Rectangle spanning about 0.0009 degrees each way.
#[must_use]
pub fn plot_shape() -> DrawnShape {
    DrawnShape::rectangle(
        Coordinate::new(12.9716, 77.5946),
        Coordinate::new(12.9725, 77.5955),
    )
}

/// Generated task list in the bare-array form.
#[must_use]
pub const fn tomato_payload() -> &'static str {
    r#"[
        {"day": 0, "task": "Prepare beds", "description": "Till and level", "phase": "Land Preparation", "priority": "High"},
        {"day": 3, "task": "Sow seeds", "description": "Sow 2 cm deep", "phase": "Planting", "priority": "High"},
        {"day": 10, "task": "First irrigation", "description": "Light watering", "phase": "Growth", "priority": "Medium"},
        {"day": 30, "task": "Side dressing", "description": "Apply compost", "phase": "Growth", "priority": "Low"}
    ]"#
}
