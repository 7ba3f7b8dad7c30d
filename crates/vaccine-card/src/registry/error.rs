use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde_json::json;

use super::domain::{PersonId, VaccinationId, VaccineId};
use super::store::StoreError;

/// A referenced entity is missing from its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    #[error("person not found with id: {0}")]
    Person(PersonId),
    #[error("vaccine not found with id: {0}")]
    Vaccine(VaccineId),
    #[error("vaccination not found with id: {0}")]
    Vaccination(VaccinationId),
}

/// A business rule rejected the request before anything was written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("name must not be empty")]
    EmptyName,
    #[error("non-recurring vaccines must have a dose count greater than zero")]
    DoseCountRequired,
    #[error("vaccines with booster doses must have a booster count greater than zero")]
    BoosterCountRequired,
    #[error("vaccine {name} only allows {total} doses")]
    DoseLimitReached { name: String, total: u32 },
    #[error("the next dose of vaccine {name} can only be registered from {}", .next_eligible.format("%d/%m/%Y"))]
    DoseTooEarly {
        name: String,
        next_eligible: NaiveDate,
    },
}

/// Error surface of the registry services. Never recovered internally;
/// the HTTP boundary translates it to a status code and the uniform
/// `{ "message": ... }` body.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RegistryError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            RegistryError::Rule(err) => (StatusCode::CONFLICT, err.to_string()),
            RegistryError::Store(err) => {
                tracing::error!(error = %err, "store failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an unexpected error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
