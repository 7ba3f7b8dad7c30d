use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use vaccine_card::registry::{
    Person, PersonDraft, PersonId, PersonStore, ScheduleDraft, StoreError, VaccinationDraft,
    VaccinationEvent, VaccinationId, VaccinationStore, VaccineId, VaccineSchedule, VaccineStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory person store; ids come from a per-store sequence, matching the
/// identity-column behavior of a relational backing store.
#[derive(Default)]
pub(crate) struct InMemoryPersonStore {
    sequence: AtomicU32,
    records: Mutex<HashMap<PersonId, Person>>,
}

impl PersonStore for InMemoryPersonStore {
    fn add(&self, draft: PersonDraft) -> Result<Person, StoreError> {
        let id = PersonId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let person = Person {
            id,
            name: draft.name,
            age: draft.age,
            sex: draft.sex,
        };
        self.records
            .lock()
            .expect("person store mutex poisoned")
            .insert(id, person.clone());
        Ok(person)
    }

    fn get(&self, id: PersonId) -> Result<Option<Person>, StoreError> {
        let guard = self.records.lock().expect("person store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Person>, StoreError> {
        let guard = self.records.lock().expect("person store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn update(&self, person: Person) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("person store mutex poisoned")
            .insert(person.id, person);
        Ok(())
    }

    fn remove(&self, id: PersonId) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("person store mutex poisoned")
            .remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryVaccineStore {
    sequence: AtomicU32,
    records: Mutex<HashMap<VaccineId, VaccineSchedule>>,
}

impl VaccineStore for InMemoryVaccineStore {
    fn add(&self, draft: ScheduleDraft) -> Result<VaccineSchedule, StoreError> {
        let id = VaccineId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let schedule = VaccineSchedule {
            id,
            name: draft.name,
            minimum_age: draft.minimum_age,
            dose_interval_months: draft.dose_interval_months,
            recurring: draft.recurring,
            dose_count: draft.dose_count,
            has_booster: draft.has_booster,
            booster_count: draft.booster_count,
        };
        self.records
            .lock()
            .expect("vaccine store mutex poisoned")
            .insert(id, schedule.clone());
        Ok(schedule)
    }

    fn get(&self, id: VaccineId) -> Result<Option<VaccineSchedule>, StoreError> {
        let guard = self.records.lock().expect("vaccine store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<VaccineSchedule>, StoreError> {
        let guard = self.records.lock().expect("vaccine store mutex poisoned");
        let mut schedules: Vec<VaccineSchedule> = guard.values().cloned().collect();
        schedules.sort_by_key(|schedule| schedule.id);
        Ok(schedules)
    }

    fn update(&self, schedule: VaccineSchedule) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("vaccine store mutex poisoned")
            .insert(schedule.id, schedule);
        Ok(())
    }

    fn remove(&self, id: VaccineId) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("vaccine store mutex poisoned")
            .remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryVaccinationStore {
    sequence: AtomicU32,
    records: Mutex<HashMap<VaccinationId, VaccinationEvent>>,
}

impl VaccinationStore for InMemoryVaccinationStore {
    fn add(&self, draft: VaccinationDraft) -> Result<VaccinationEvent, StoreError> {
        let id = VaccinationId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let event = VaccinationEvent {
            id,
            person_id: draft.person_id,
            vaccine_id: draft.vaccine_id,
            date: draft.date,
        };
        self.records
            .lock()
            .expect("vaccination store mutex poisoned")
            .insert(id, event.clone());
        Ok(event)
    }

    fn get(&self, id: VaccinationId) -> Result<Option<VaccinationEvent>, StoreError> {
        let guard = self
            .records
            .lock()
            .expect("vaccination store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<VaccinationEvent>, StoreError> {
        let guard = self
            .records
            .lock()
            .expect("vaccination store mutex poisoned");
        let mut events: Vec<VaccinationEvent> = guard.values().cloned().collect();
        events.sort_by_key(|event| event.id);
        Ok(events)
    }

    fn update(&self, event: VaccinationEvent) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("vaccination store mutex poisoned")
            .insert(event.id, event);
        Ok(())
    }

    fn remove(&self, id: VaccinationId) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("vaccination store mutex poisoned")
            .remove(&id);
        Ok(())
    }

    fn find_by_person(&self, person_id: PersonId) -> Result<Vec<VaccinationEvent>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|event| event.person_id == person_id)
            .collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
