//! In-memory repository for crop-planning records.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::land::domain::LandId;
use crate::schedule::{
    domain::{PlanningRecord, PlanningRecordId},
    ports::{
        PlanningRecordRepository, PlanningRecordRepositoryError, PlanningRecordRepositoryResult,
    },
};

/// Thread-safe in-memory planning record repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanningRecordRepository {
    state: Arc<RwLock<InMemoryPlanningState>>,
}

#[derive(Debug, Default)]
struct InMemoryPlanningState {
    records: HashMap<PlanningRecordId, PlanningRecord>,
    land_index: HashMap<LandId, Vec<PlanningRecordId>>,
}

impl InMemoryPlanningRecordRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanningRecordRepository for InMemoryPlanningRecordRepository {
    async fn store(&self, record: &PlanningRecord) -> PlanningRecordRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PlanningRecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.records.contains_key(&record.id()) {
            return Err(PlanningRecordRepositoryError::DuplicateRecord(record.id()));
        }

        state
            .land_index
            .entry(record.land_id())
            .or_default()
            .push(record.id());
        state.records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: PlanningRecordId,
    ) -> PlanningRecordRepositoryResult<Option<PlanningRecord>> {
        let state = self.state.read().map_err(|err| {
            PlanningRecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.records.get(&id).cloned())
    }

    async fn list_by_land(
        &self,
        land_id: LandId,
    ) -> PlanningRecordRepositoryResult<Vec<PlanningRecord>> {
        let state = self.state.read().map_err(|err| {
            PlanningRecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut records: Vec<PlanningRecord> = state
            .land_index
            .get(&land_id)
            .map(|ids| {
                ids.iter()
                    .rev()
                    .filter_map(|id| state.records.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        records.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        Ok(records)
    }
}
