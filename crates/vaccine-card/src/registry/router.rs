use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;

use super::domain::{
    PersonDraft, PersonId, ScheduleDraft, Sex, VaccinationDraft, VaccinationId, VaccineId,
};
use super::error::RegistryError;
use super::people::PersonService;
use super::store::{PersonStore, VaccinationStore, VaccineStore};
use super::vaccinations::VaccinationService;
use super::vaccines::VaccineService;

/// The three registry services wired over a shared set of stores; the
/// router's state.
pub struct Registry<P, V, S> {
    pub people: Arc<PersonService<P>>,
    pub vaccines: Arc<VaccineService<V>>,
    pub vaccinations: Arc<VaccinationService<S, P, V>>,
}

impl<P, V, S> Registry<P, V, S>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    pub fn new(person_store: Arc<P>, vaccine_store: Arc<V>, vaccination_store: Arc<S>) -> Self {
        let people = Arc::new(PersonService::new(person_store));
        let vaccines = Arc::new(VaccineService::new(vaccine_store));
        let vaccinations = Arc::new(VaccinationService::new(
            vaccination_store,
            people.clone(),
            vaccines.clone(),
        ));
        Self {
            people,
            vaccines,
            vaccinations,
        }
    }
}

/// Router builder exposing the registry's HTTP surface.
pub fn registry_router<P, V, S>(registry: Arc<Registry<P, V, S>>) -> Router
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/people",
            get(list_people::<P, V, S>).post(create_person::<P, V, S>),
        )
        .route("/api/v1/people/sex", get(list_sex_labels))
        .route(
            "/api/v1/people/:person_id",
            get(get_person::<P, V, S>)
                .put(update_person::<P, V, S>)
                .delete(delete_person::<P, V, S>),
        )
        .route(
            "/api/v1/people/:person_id/vaccinations",
            get(person_history::<P, V, S>),
        )
        .route(
            "/api/v1/people/:person_id/overdue-vaccines",
            get(person_overdue::<P, V, S>),
        )
        .route(
            "/api/v1/vaccines",
            get(list_vaccines::<P, V, S>).post(create_vaccine::<P, V, S>),
        )
        .route(
            "/api/v1/vaccines/:vaccine_id",
            get(get_vaccine::<P, V, S>)
                .put(update_vaccine::<P, V, S>)
                .delete(delete_vaccine::<P, V, S>),
        )
        .route(
            "/api/v1/vaccinations",
            get(list_vaccinations::<P, V, S>).post(create_vaccination::<P, V, S>),
        )
        .route(
            "/api/v1/vaccinations/:vaccination_id",
            get(get_vaccination::<P, V, S>)
                .put(update_vaccination::<P, V, S>)
                .delete(delete_vaccination::<P, V, S>),
        )
        .with_state(registry)
}

async fn list_sex_labels() -> Json<Vec<&'static str>> {
    Json(Sex::ALL.iter().map(|sex| sex.label()).collect())
}

async fn create_person<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Json(draft): Json<PersonDraft>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let person = registry.people.create(draft)?;
    Ok((StatusCode::CREATED, Json(person)).into_response())
}

async fn get_person<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(person_id): Path<u32>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let person = registry.people.get_by_id(PersonId(person_id))?;
    Ok(Json(person).into_response())
}

async fn list_people<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let people = registry.people.get_all()?;
    Ok(Json(people).into_response())
}

async fn update_person<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(person_id): Path<u32>,
    Json(draft): Json<PersonDraft>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let person = registry.people.update(PersonId(person_id), draft)?;
    Ok(Json(person).into_response())
}

async fn delete_person<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(person_id): Path<u32>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    registry.people.delete(PersonId(person_id))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn person_history<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(person_id): Path<u32>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let history = registry.vaccinations.history_by_person(PersonId(person_id))?;
    Ok(Json(history).into_response())
}

async fn person_overdue<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(person_id): Path<u32>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let today = Local::now().date_naive();
    let overdue = registry
        .vaccinations
        .find_overdue_by_person(PersonId(person_id), today)?;
    Ok(Json(overdue).into_response())
}

async fn create_vaccine<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Json(draft): Json<ScheduleDraft>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let schedule = registry.vaccines.create(draft)?;
    Ok((StatusCode::CREATED, Json(schedule)).into_response())
}

async fn get_vaccine<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(vaccine_id): Path<u32>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let schedule = registry.vaccines.get_by_id(VaccineId(vaccine_id))?;
    Ok(Json(schedule).into_response())
}

async fn list_vaccines<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let schedules = registry.vaccines.get_all()?;
    Ok(Json(schedules).into_response())
}

async fn update_vaccine<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(vaccine_id): Path<u32>,
    Json(draft): Json<ScheduleDraft>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let schedule = registry.vaccines.update(VaccineId(vaccine_id), draft)?;
    Ok(Json(schedule).into_response())
}

async fn delete_vaccine<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(vaccine_id): Path<u32>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    registry.vaccines.delete(VaccineId(vaccine_id))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn create_vaccination<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Json(draft): Json<VaccinationDraft>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let event = registry.vaccinations.create(draft)?;
    Ok((StatusCode::CREATED, Json(event)).into_response())
}

async fn get_vaccination<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(vaccination_id): Path<u32>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let event = registry
        .vaccinations
        .get_by_id(VaccinationId(vaccination_id))?;
    Ok(Json(event).into_response())
}

async fn list_vaccinations<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let events = registry.vaccinations.get_all()?;
    Ok(Json(events).into_response())
}

async fn update_vaccination<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(vaccination_id): Path<u32>,
    Json(draft): Json<VaccinationDraft>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    let event = registry
        .vaccinations
        .update(VaccinationId(vaccination_id), draft)?;
    Ok(Json(event).into_response())
}

async fn delete_vaccination<P, V, S>(
    State(registry): State<Arc<Registry<P, V, S>>>,
    Path(vaccination_id): Path<u32>,
) -> Result<Response, RegistryError>
where
    P: PersonStore + 'static,
    V: VaccineStore + 'static,
    S: VaccinationStore + 'static,
{
    registry.vaccinations.delete(VaccinationId(vaccination_id))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
