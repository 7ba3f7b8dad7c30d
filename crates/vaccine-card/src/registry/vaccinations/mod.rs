mod eligibility;
mod service;

pub use service::{DoseEntry, VaccinationService, VaccineHistory};
