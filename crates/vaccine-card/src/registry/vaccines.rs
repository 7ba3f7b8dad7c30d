use std::sync::Arc;

use super::domain::{ScheduleDraft, VaccineId, VaccineSchedule};
use super::error::{NotFound, RegistryError, RuleViolation};
use super::store::VaccineStore;

/// CRUD service for the vaccine catalog. The dose/booster invariant is
/// enforced when a schedule is created; updates replace fields without
/// re-checking it.
pub struct VaccineService<S> {
    store: Arc<S>,
}

impl<S> VaccineService<S>
where
    S: VaccineStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: ScheduleDraft) -> Result<VaccineSchedule, RegistryError> {
        if draft.name.trim().is_empty() {
            return Err(RuleViolation::EmptyName.into());
        }
        draft.validate()?;
        Ok(self.store.add(draft)?)
    }

    pub fn update(
        &self,
        id: VaccineId,
        draft: ScheduleDraft,
    ) -> Result<VaccineSchedule, RegistryError> {
        if draft.name.trim().is_empty() {
            return Err(RuleViolation::EmptyName.into());
        }
        let mut schedule = self.get_by_id(id)?;
        schedule.name = draft.name;
        schedule.minimum_age = draft.minimum_age;
        schedule.dose_interval_months = draft.dose_interval_months;
        schedule.recurring = draft.recurring;
        schedule.dose_count = draft.dose_count;
        schedule.has_booster = draft.has_booster;
        schedule.booster_count = draft.booster_count;
        self.store.update(schedule.clone())?;
        Ok(schedule)
    }

    pub fn delete(&self, id: VaccineId) -> Result<(), RegistryError> {
        let schedule = self.get_by_id(id)?;
        self.store.remove(schedule.id)?;
        Ok(())
    }

    pub fn get_by_id(&self, id: VaccineId) -> Result<VaccineSchedule, RegistryError> {
        self.store
            .get(id)?
            .ok_or_else(|| NotFound::Vaccine(id).into())
    }

    pub fn get_all(&self) -> Result<Vec<VaccineSchedule>, RegistryError> {
        Ok(self.store.list()?)
    }
}
