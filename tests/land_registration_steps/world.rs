//! Shared world state for land registration BDD scenarios.

use std::sync::Arc;

use furrow::land::{
    adapters::memory::InMemoryLandRepository,
    domain::{DrawnShape, Land},
    services::{LandRegistrationError, LandRegistrationService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestLandService = LandRegistrationService<InMemoryLandRepository, DefaultClock>;

/// Scenario world for land registration behaviour tests.
pub struct LandRegistrationWorld {
    pub service: TestLandService,
    pub pending_shape: Option<DrawnShape>,
    pub manual_size_acres: Option<f64>,
    pub last_result: Option<Result<Land, LandRegistrationError>>,
}

impl LandRegistrationWorld {
    /// Creates a world with no shape drawn yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: LandRegistrationService::new(
                Arc::new(InMemoryLandRepository::new()),
                Arc::new(DefaultClock),
            ),
            pending_shape: None,
            manual_size_acres: None,
            last_result: None,
        }
    }

    /// Returns the successfully registered land.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was registered or registration failed.
    pub fn registered_land(&self) -> Result<&Land, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Ok(land)) => Ok(land),
            Some(Err(err)) => Err(eyre::eyre!("registration failed: {err}")),
            None => Err(eyre::eyre!("no registration attempted")),
        }
    }
}

impl Default for LandRegistrationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LandRegistrationWorld {
    LandRegistrationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
