use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DonationIntake, DonorId};
use super::repository::{NotificationPublisher, RegistrationRepository, RepositoryError};
use super::service::{DonationRegistrationService, RegistrationError};

/// Router builder exposing HTTP endpoints for intake and assessment.
pub fn registration_router<R, N>(service: Arc<DonationRegistrationService<R, N>>) -> Router
where
    R: RegistrationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/donation/registrations", post(register_handler::<R, N>))
        .route(
            "/api/v1/donation/registrations/:donor_id",
            get(status_handler::<R, N>),
        )
        .route(
            "/api/v1/donation/registrations/:donor_id/assessment",
            post(assess_handler::<R, N>),
        )
        .with_state(service)
}

/// Intake payload plus an optional override of the registration date.
#[derive(Debug, Deserialize)]
pub struct RegistrationRequest {
    #[serde(flatten)]
    pub intake: DonationIntake,
    #[serde(default)]
    pub registered_on: Option<NaiveDate>,
}

/// Optional override of the assessment date; defaults to today.
#[derive(Debug, Default, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub on: Option<NaiveDate>,
}

pub(crate) async fn register_handler<R, N>(
    State(service): State<Arc<DonationRegistrationService<R, N>>>,
    axum::Json(request): axum::Json<RegistrationRequest>,
) -> Response
where
    R: RegistrationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let today = request
        .registered_on
        .unwrap_or_else(|| Local::now().date_naive());

    match service.register(request.intake, today) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(RegistrationError::Screening(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "registration already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn assess_handler<R, N>(
    State(service): State<Arc<DonationRegistrationService<R, N>>>,
    Path(donor_id): Path<String>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response
where
    R: RegistrationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = DonorId(donor_id);
    let on = request.on.unwrap_or_else(|| Local::now().date_naive());

    match service.assess(&id, on) {
        Ok(verdict) => (StatusCode::OK, axum::Json(verdict)).into_response(),
        Err(RegistrationError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "unknown donor",
                "donor_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<DonationRegistrationService<R, N>>>,
    Path(donor_id): Path<String>,
) -> Response
where
    R: RegistrationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = DonorId(donor_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(RegistrationError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "unknown donor",
                "donor_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
