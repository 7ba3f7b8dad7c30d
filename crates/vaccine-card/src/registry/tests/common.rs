use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Months, NaiveDate};
use serde_json::Value;

use crate::registry::domain::{
    Person, PersonDraft, PersonId, ScheduleDraft, Sex, VaccinationDraft, VaccinationEvent,
    VaccinationId, VaccineId, VaccineSchedule,
};
use crate::registry::router::{registry_router, Registry};
use crate::registry::store::{PersonStore, StoreError, VaccinationStore, VaccineStore};

pub(super) type MemoryRegistry =
    Registry<MemoryPersonStore, MemoryVaccineStore, MemoryVaccinationStore>;

/// Fixed reference date so interval arithmetic stays deterministic.
pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .expect("date in range")
}

pub(super) fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    date - chrono::Duration::days(days)
}

pub(super) fn hepatitis_b() -> ScheduleDraft {
    ScheduleDraft {
        name: "Hepatitis B".to_string(),
        minimum_age: 0,
        dose_interval_months: 1,
        recurring: false,
        dose_count: Some(3),
        has_booster: false,
        booster_count: None,
    }
}

pub(super) fn tetanus() -> ScheduleDraft {
    ScheduleDraft {
        name: "Tetanus".to_string(),
        minimum_age: 0,
        dose_interval_months: 6,
        recurring: false,
        dose_count: Some(3),
        has_booster: true,
        booster_count: Some(2),
    }
}

pub(super) fn seasonal_flu() -> ScheduleDraft {
    ScheduleDraft {
        name: "Seasonal flu".to_string(),
        minimum_age: 6,
        dose_interval_months: 12,
        recurring: true,
        dose_count: None,
        has_booster: false,
        booster_count: None,
    }
}

pub(super) fn hpv() -> ScheduleDraft {
    ScheduleDraft {
        name: "HPV".to_string(),
        minimum_age: 9,
        dose_interval_months: 6,
        recurring: false,
        dose_count: Some(2),
        has_booster: false,
        booster_count: None,
    }
}

pub(super) fn adult() -> PersonDraft {
    PersonDraft {
        name: "Joana Prado".to_string(),
        age: 30,
        sex: Sex::Female,
    }
}

pub(super) fn infant() -> PersonDraft {
    PersonDraft {
        name: "Miguel Prado".to_string(),
        age: 1,
        sex: Sex::Male,
    }
}

pub(super) fn build_registry() -> (Arc<MemoryRegistry>, Arc<MemoryVaccinationStore>) {
    let people = Arc::new(MemoryPersonStore::default());
    let vaccines = Arc::new(MemoryVaccineStore::default());
    let vaccinations = Arc::new(MemoryVaccinationStore::default());
    let registry = Arc::new(Registry::new(people, vaccines, vaccinations.clone()));
    (registry, vaccinations)
}

pub(super) fn registry_and_router() -> (Arc<MemoryRegistry>, axum::Router) {
    let (registry, _) = build_registry();
    (registry.clone(), registry_router(registry))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default)]
pub(super) struct MemoryPersonStore {
    sequence: AtomicU32,
    records: Mutex<HashMap<PersonId, Person>>,
}

impl PersonStore for MemoryPersonStore {
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
pub(super) struct MemoryVaccineStore {
    sequence: AtomicU32,
    records: Mutex<HashMap<VaccineId, VaccineSchedule>>,
}

impl VaccineStore for MemoryVaccineStore {
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
        Ok(guard.values().cloned().collect())
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
pub(super) struct MemoryVaccinationStore {
    sequence: AtomicU32,
    records: Mutex<HashMap<VaccinationId, VaccinationEvent>>,
}

impl MemoryVaccinationStore {
    pub(super) fn events(&self) -> Vec<VaccinationEvent> {
        let guard = self
            .records
            .lock()
            .expect("vaccination store mutex poisoned");
        let mut events: Vec<VaccinationEvent> = guard.values().cloned().collect();
        events.sort_by_key(|event| event.id);
        events
    }
}

impl VaccinationStore for MemoryVaccinationStore {
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
        Ok(self.events())
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
            .events()
            .into_iter()
            .filter(|event| event.person_id == person_id)
            .collect())
    }
}
