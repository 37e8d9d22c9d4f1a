//! In-memory repository for crop schedules.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::land::domain::{LandId, SoilType};
use crate::schedule::{
    domain::{CropName, CropSchedule, ScheduleId, Season},
    ports::{ScheduleRepository, ScheduleRepositoryError, ScheduleRepositoryResult},
};

/// Thread-safe in-memory schedule repository.
///
/// Every write holds the state lock for its whole check-and-set, which
/// serialises writers to the same schedule.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleRepository {
    state: Arc<RwLock<InMemoryScheduleState>>,
}

#[derive(Debug, Default)]
struct InMemoryScheduleState {
    schedules: HashMap<ScheduleId, CropSchedule>,
    insertion_order: Vec<ScheduleId>,
}

impl InMemoryScheduleState {
    fn active_for(&self, land_id: LandId, crop_name: &CropName) -> Option<&CropSchedule> {
        self.schedules.values().find(|schedule| {
            schedule.is_active()
                && schedule.land_id() == land_id
                && schedule.crop_name() == crop_name
        })
    }

    fn in_insertion_order(&self) -> impl Iterator<Item = &CropSchedule> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.schedules.get(id))
    }

    fn latest_where(&self, predicate: impl Fn(&CropSchedule) -> bool) -> Option<CropSchedule> {
        self.in_insertion_order()
            .filter(|schedule| predicate(schedule))
            .max_by_key(|schedule| schedule.created_at())
            .cloned()
    }

    fn insert(&mut self, schedule: &CropSchedule) {
        self.schedules.insert(schedule.id(), schedule.clone());
        self.insertion_order.push(schedule.id());
    }
}

impl InMemoryScheduleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ScheduleRepositoryResult<RwLockReadGuard<'_, InMemoryScheduleState>> {
        self.state.read().map_err(|err| {
            ScheduleRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ScheduleRepositoryResult<RwLockWriteGuard<'_, InMemoryScheduleState>> {
        self.state.write().map_err(|err| {
            ScheduleRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn store(&self, schedule: &CropSchedule) -> ScheduleRepositoryResult<()> {
        let mut state = self.write()?;
        if state.schedules.contains_key(&schedule.id()) {
            return Err(ScheduleRepositoryError::DuplicateSchedule(schedule.id()));
        }
        if schedule.is_active()
            && let Some(existing) = state.active_for(schedule.land_id(), schedule.crop_name())
        {
            return Err(ScheduleRepositoryError::ActiveScheduleConflict {
                land_id: schedule.land_id(),
                crop_name: schedule.crop_name().clone(),
                existing: existing.id(),
            });
        }
        state.insert(schedule);
        Ok(())
    }

    async fn update(
        &self,
        schedule: &CropSchedule,
        expected_version: u64,
    ) -> ScheduleRepositoryResult<()> {
        let mut state = self.write()?;
        let stored_version = state
            .schedules
            .get(&schedule.id())
            .map(CropSchedule::version)
            .ok_or_else(|| ScheduleRepositoryError::NotFound(schedule.id()))?;
        if stored_version != expected_version {
            return Err(ScheduleRepositoryError::VersionConflict {
                id: schedule.id(),
                expected: expected_version,
                actual: stored_version,
            });
        }
        if schedule.is_active()
            && let Some(existing) = state.active_for(schedule.land_id(), schedule.crop_name())
            && existing.id() != schedule.id()
        {
            return Err(ScheduleRepositoryError::ActiveScheduleConflict {
                land_id: schedule.land_id(),
                crop_name: schedule.crop_name().clone(),
                existing: existing.id(),
            });
        }
        state.schedules.insert(schedule.id(), schedule.clone());
        Ok(())
    }

    async fn activate(&self, schedule: &CropSchedule) -> ScheduleRepositoryResult<Vec<ScheduleId>> {
        if !schedule.is_active() {
            return Err(ScheduleRepositoryError::NotActive(schedule.id()));
        }
        let mut state = self.write()?;
        if state.schedules.contains_key(&schedule.id()) {
            return Err(ScheduleRepositoryError::DuplicateSchedule(schedule.id()));
        }

        let superseded: Vec<ScheduleId> = state
            .schedules
            .values()
            .filter(|other| {
                other.is_active()
                    && other.land_id() == schedule.land_id()
                    && other.crop_name() == schedule.crop_name()
            })
            .map(CropSchedule::id)
            .collect();
        for id in &superseded {
            if let Some(other) = state.schedules.get_mut(id) {
                other.deactivate(schedule.created_at());
            }
        }
        state.insert(schedule);
        Ok(superseded)
    }

    async fn find_by_id(&self, id: ScheduleId) -> ScheduleRepositoryResult<Option<CropSchedule>> {
        let state = self.read()?;
        Ok(state.schedules.get(&id).cloned())
    }

    async fn find_active(
        &self,
        land_id: LandId,
        crop_name: &CropName,
    ) -> ScheduleRepositoryResult<Option<CropSchedule>> {
        let state = self.read()?;
        Ok(state.active_for(land_id, crop_name).cloned())
    }

    async fn list_active_by_land(
        &self,
        land_id: LandId,
    ) -> ScheduleRepositoryResult<Vec<CropSchedule>> {
        let state = self.read()?;
        let mut active: Vec<CropSchedule> = state
            .in_insertion_order()
            .filter(|schedule| schedule.is_active() && schedule.land_id() == land_id)
            .cloned()
            .collect();
        active.sort_by(|left, right| left.crop_name().cmp(right.crop_name()));
        Ok(active)
    }

    async fn list_by_land(&self, land_id: LandId) -> ScheduleRepositoryResult<Vec<CropSchedule>> {
        let state = self.read()?;
        Ok(state
            .in_insertion_order()
            .filter(|schedule| schedule.land_id() == land_id)
            .cloned()
            .collect())
    }

    async fn find_latest_for_crop(
        &self,
        land_id: LandId,
        crop_name: &CropName,
    ) -> ScheduleRepositoryResult<Option<CropSchedule>> {
        let state = self.read()?;
        Ok(state.latest_where(|schedule| {
            schedule.land_id() == land_id && schedule.crop_name() == crop_name
        }))
    }

    async fn find_latest_matching(
        &self,
        land_id: LandId,
        crop_name: &CropName,
        soil_type: &SoilType,
        season: Season,
    ) -> ScheduleRepositoryResult<Option<CropSchedule>> {
        let state = self.read()?;
        Ok(state.latest_where(|schedule| {
            schedule.land_id() == land_id
                && schedule.crop_name() == crop_name
                && schedule.soil_type() == soil_type
                && schedule.season() == season
        }))
    }
}
