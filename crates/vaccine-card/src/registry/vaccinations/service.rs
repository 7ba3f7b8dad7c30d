use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{
    PersonId, VaccinationDraft, VaccinationEvent, VaccinationId, VaccineId, VaccineSchedule,
};
use super::super::error::{NotFound, RegistryError};
use super::super::people::PersonService;
use super::super::store::{PersonStore, VaccinationStore, VaccineStore};
use super::super::vaccines::VaccineService;
use super::eligibility;

/// Ledger service for administered doses, composing the person registry and
/// vaccine catalog with the eligibility rules.
pub struct VaccinationService<S, P, V> {
    store: Arc<S>,
    people: Arc<PersonService<P>>,
    vaccines: Arc<VaccineService<V>>,
}

/// One vaccine's slice of a person's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaccineHistory {
    pub vaccine_id: VaccineId,
    pub doses: Vec<DoseEntry>,
}

/// A single administered dose within a history group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoseEntry {
    pub vaccination_id: VaccinationId,
    pub date: NaiveDate,
}

impl<S, P, V> VaccinationService<S, P, V>
where
    S: VaccinationStore,
    P: PersonStore,
    V: VaccineStore,
{
    pub fn new(
        store: Arc<S>,
        people: Arc<PersonService<P>>,
        vaccines: Arc<VaccineService<V>>,
    ) -> Self {
        Self {
            store,
            people,
            vaccines,
        }
    }

    /// Validate and record a new dose. Checks run in a fixed order: the
    /// person must exist, the vaccine must exist, the dose ceiling must not
    /// be reached, and the interval since the latest prior dose must have
    /// elapsed. Nothing is written unless every check passes.
    pub fn create(&self, draft: VaccinationDraft) -> Result<VaccinationEvent, RegistryError> {
        self.people.get_by_id(draft.person_id)?;
        let vaccine = self.vaccines.get_by_id(draft.vaccine_id)?;

        let history = self.store.find_by_person(draft.person_id)?;
        let mut prior: Vec<&VaccinationEvent> = history
            .iter()
            .filter(|event| event.vaccine_id == draft.vaccine_id)
            .collect();

        eligibility::check_dose_limit(&vaccine, prior.len())?;

        prior.sort_by_key(|event| (event.date, event.id));
        let last_dose = prior.last().map(|event| event.date);
        eligibility::check_interval(&vaccine, last_dose, draft.date)?;

        Ok(self.store.add(draft)?)
    }

    /// Full replacement of the mutable fields; the id is preserved.
    pub fn update(
        &self,
        id: VaccinationId,
        draft: VaccinationDraft,
    ) -> Result<VaccinationEvent, RegistryError> {
        let mut event = self.get_by_id(id)?;
        event.person_id = draft.person_id;
        event.vaccine_id = draft.vaccine_id;
        event.date = draft.date;
        self.store.update(event.clone())?;
        Ok(event)
    }

    pub fn delete(&self, id: VaccinationId) -> Result<(), RegistryError> {
        let event = self.get_by_id(id)?;
        self.store.remove(event.id)?;
        Ok(())
    }

    pub fn get_by_id(&self, id: VaccinationId) -> Result<VaccinationEvent, RegistryError> {
        self.store
            .get(id)?
            .ok_or_else(|| NotFound::Vaccination(id).into())
    }

    pub fn get_all(&self) -> Result<Vec<VaccinationEvent>, RegistryError> {
        Ok(self.store.list()?)
    }

    pub fn find_by_person(&self, person_id: PersonId) -> Result<Vec<VaccinationEvent>, RegistryError> {
        Ok(self.store.find_by_person(person_id)?)
    }

    /// The person's doses grouped by vaccine, each group sorted ascending by
    /// date (ties broken by creation id).
    pub fn history_by_person(&self, person_id: PersonId) -> Result<Vec<VaccineHistory>, RegistryError> {
        let mut groups: BTreeMap<VaccineId, Vec<DoseEntry>> = BTreeMap::new();
        for event in self.find_by_person(person_id)? {
            groups.entry(event.vaccine_id).or_default().push(DoseEntry {
                vaccination_id: event.id,
                date: event.date,
            });
        }

        Ok(groups
            .into_iter()
            .map(|(vaccine_id, mut doses)| {
                doses.sort_by_key(|dose| (dose.date, dose.vaccination_id));
                VaccineHistory { vaccine_id, doses }
            })
            .collect())
    }

    /// Vaccines the person has fallen behind on as of `today`: age-eligible,
    /// series not complete, and either never started or past the interval
    /// since the latest dose. Pure read; safe to call repeatedly.
    pub fn find_overdue_by_person(
        &self,
        person_id: PersonId,
        today: NaiveDate,
    ) -> Result<Vec<VaccineSchedule>, RegistryError> {
        let person = self.people.get_by_id(person_id)?;

        let mut doses_by_vaccine: HashMap<VaccineId, Vec<VaccinationEvent>> = HashMap::new();
        for event in self.store.find_by_person(person_id)? {
            doses_by_vaccine
                .entry(event.vaccine_id)
                .or_default()
                .push(event);
        }
        for doses in doses_by_vaccine.values_mut() {
            doses.sort_by_key(|event| (event.date, event.id));
        }

        let mut overdue = Vec::new();
        for vaccine in self.vaccines.get_all()? {
            let doses = doses_by_vaccine
                .get(&vaccine.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            if eligibility::is_overdue(&vaccine, &person, doses, today) {
                overdue.push(vaccine);
            }
        }

        Ok(overdue)
    }
}
