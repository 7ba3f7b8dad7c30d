//! Vaccination registry: the domain model, the store abstractions the
//! services are built over, the three entity services, and the HTTP router.
//!
//! The interesting part lives in [`vaccinations`]: registering a dose runs
//! the eligibility checks (existence, dose ceiling, interval) before
//! anything is written, and the overdue query cross-references the whole
//! catalog against a person's dose history.

pub mod domain;
pub mod error;
pub mod people;
pub mod router;
pub mod store;
pub mod vaccinations;
pub mod vaccines;

#[cfg(test)]
mod tests;

pub use domain::{
    Person, PersonDraft, PersonId, ScheduleDraft, Sex, VaccinationDraft, VaccinationEvent,
    VaccinationId, VaccineId, VaccineSchedule,
};
pub use error::{NotFound, RegistryError, RuleViolation};
pub use people::PersonService;
pub use router::{registry_router, Registry};
pub use store::{PersonStore, StoreError, VaccinationStore, VaccineStore};
pub use vaccinations::{DoseEntry, VaccinationService, VaccineHistory};
pub use vaccines::VaccineService;
