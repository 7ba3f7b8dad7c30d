use super::domain::{
    Person, PersonDraft, PersonId, ScheduleDraft, VaccinationDraft, VaccinationEvent,
    VaccinationId, VaccineId, VaccineSchedule,
};

/// Error enumeration for backing-store failures. Existence checks are the
/// services' concern, so absence is reported through `Option`, not here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for people, so the services can be exercised against
/// in-memory and relational-backed implementations alike. Ids are assigned
/// by the store on `add`.
pub trait PersonStore: Send + Sync {
    fn add(&self, draft: PersonDraft) -> Result<Person, StoreError>;
    fn get(&self, id: PersonId) -> Result<Option<Person>, StoreError>;
    fn list(&self) -> Result<Vec<Person>, StoreError>;
    fn update(&self, person: Person) -> Result<(), StoreError>;
    fn remove(&self, id: PersonId) -> Result<(), StoreError>;
}

/// Storage abstraction for the vaccine catalog.
pub trait VaccineStore: Send + Sync {
    fn add(&self, draft: ScheduleDraft) -> Result<VaccineSchedule, StoreError>;
    fn get(&self, id: VaccineId) -> Result<Option<VaccineSchedule>, StoreError>;
    fn list(&self) -> Result<Vec<VaccineSchedule>, StoreError>;
    fn update(&self, schedule: VaccineSchedule) -> Result<(), StoreError>;
    fn remove(&self, id: VaccineId) -> Result<(), StoreError>;
}

/// Storage abstraction for the administered-dose ledger.
pub trait VaccinationStore: Send + Sync {
    fn add(&self, draft: VaccinationDraft) -> Result<VaccinationEvent, StoreError>;
    fn get(&self, id: VaccinationId) -> Result<Option<VaccinationEvent>, StoreError>;
    fn list(&self) -> Result<Vec<VaccinationEvent>, StoreError>;
    fn update(&self, event: VaccinationEvent) -> Result<(), StoreError>;
    fn remove(&self, id: VaccinationId) -> Result<(), StoreError>;
    fn find_by_person(&self, person_id: PersonId) -> Result<Vec<VaccinationEvent>, StoreError>;
}
