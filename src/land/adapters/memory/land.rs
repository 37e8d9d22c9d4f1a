//! In-memory repository for land registration.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::land::{
    domain::{Land, LandId, OwnerId},
    ports::{LandRepository, LandRepositoryError, LandRepositoryResult},
};

/// Thread-safe in-memory land repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLandRepository {
    state: Arc<RwLock<InMemoryLandState>>,
}

#[derive(Debug, Default)]
struct InMemoryLandState {
    lands: HashMap<LandId, Land>,
    owner_index: HashMap<OwnerId, Vec<LandId>>,
}

impl InMemoryLandRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LandRepository for InMemoryLandRepository {
    async fn store(&self, land: &Land) -> LandRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            LandRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.lands.contains_key(&land.id()) {
            return Err(LandRepositoryError::DuplicateLand(land.id()));
        }

        state
            .owner_index
            .entry(land.owner_id().clone())
            .or_default()
            .push(land.id());
        state.lands.insert(land.id(), land.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: LandId) -> LandRepositoryResult<Option<Land>> {
        let state = self.state.read().map_err(|err| {
            LandRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.lands.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &OwnerId) -> LandRepositoryResult<Vec<Land>> {
        let state = self.state.read().map_err(|err| {
            LandRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let lands = state
            .owner_index
            .get(owner_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.lands.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(lands)
    }
}
