//! Service layer for land registration and lookup.

use crate::land::{
    domain::{DrawnShape, Land, LandDomainError, LandId, LandRegistration, OwnerId, SoilType},
    ports::{LandRepository, LandRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for registering a land from a drawn shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterLandRequest {
    owner_id: String,
    name: String,
    soil_type: String,
    shape: DrawnShape,
    manual_size_acres: Option<f64>,
}

impl RegisterLandRequest {
    /// Creates a request with the required registration fields.
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        soil_type: impl Into<String>,
        shape: DrawnShape,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: name.into(),
            soil_type: soil_type.into(),
            shape,
            manual_size_acres: None,
        }
    }

    /// Sets the size typed in by the grower.
    #[must_use]
    pub const fn with_manual_size(mut self, acres: f64) -> Self {
        self.manual_size_acres = Some(acres);
        self
    }
}

/// Service-level errors for land registration.
#[derive(Debug, Error)]
pub enum LandRegistrationError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] LandDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] LandRepositoryError),
}

/// Result type for land registration service operations.
pub type LandRegistrationResult<T> = Result<T, LandRegistrationError>;

/// Land registration orchestration service.
#[derive(Clone)]
pub struct LandRegistrationService<R, C>
where
    R: LandRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> LandRegistrationService<R, C>
where
    R: LandRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new land registration service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a land, measuring its acreage from the drawn shape.
    ///
    /// # Errors
    ///
    /// Returns [`LandRegistrationError::Domain`] when the owner, soil type,
    /// geometry, or manual size is invalid, and
    /// [`LandRegistrationError::Repository`] when persistence fails.
    pub async fn register_land(&self, request: RegisterLandRequest) -> LandRegistrationResult<Land> {
        let RegisterLandRequest {
            owner_id,
            name,
            soil_type,
            shape,
            manual_size_acres,
        } = request;

        let registration = LandRegistration {
            owner_id: OwnerId::new(owner_id)?,
            name,
            soil_type: SoilType::try_from(soil_type.as_str()).map_err(LandDomainError::from)?,
            shape,
            manual_size_acres,
        };
        let kind = registration.shape.kind();

        let land = Land::register(registration, &*self.clock).inspect_err(|err| {
            warn!(shape = %kind, error = %err, "land registration rejected");
        })?;
        self.repository.store(&land).await?;

        info!(
            land_id = %land.id(),
            shape = %kind,
            acres = land.size_acres(),
            "land registered"
        );
        Ok(land)
    }

    /// Retrieves a land by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LandRegistrationError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: LandId) -> LandRegistrationResult<Option<Land>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists the lands owned by a grower.
    ///
    /// # Errors
    ///
    /// Returns [`LandRegistrationError::Domain`] when the owner identifier is
    /// empty, or [`LandRegistrationError::Repository`] when lookup fails.
    pub async fn list_for_owner(&self, owner_id: &str) -> LandRegistrationResult<Vec<Land>> {
        let owner = OwnerId::new(owner_id)?;
        Ok(self.repository.list_by_owner(&owner).await?)
    }
}
