use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use hemolink::workflows::donation::registration::{
    registration_router, DonationRegistrationService, NotificationPublisher,
    RegistrationRepository,
};
use hemolink::workflows::donation::BloodGroup;

pub(crate) fn with_registration_routes<R, N>(
    service: Arc<DonationRegistrationService<R, N>>,
) -> axum::Router
where
    R: RegistrationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    registration_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/donation/compatibility/:blood_group",
            axum::routing::get(compatibility_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn compatibility_endpoint(Path(blood_group): Path<String>) -> Response {
    let group = match blood_group.parse::<BloodGroup>() {
        Ok(group) => group,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    };

    let can_donate_to: Vec<&str> = group
        .compatible_recipients()
        .iter()
        .map(|recipient| recipient.label())
        .collect();
    let can_receive_from: Vec<&str> = group
        .compatible_donors()
        .iter()
        .map(|donor| donor.label())
        .collect();

    let payload = json!({
        "blood_group": group.label(),
        "can_donate_to": can_donate_to,
        "can_receive_from": can_receive_from,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn compatibility_endpoint_lists_both_directions() {
        let response = compatibility_endpoint(Path("O-".to_string())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["blood_group"], "O-");
        assert_eq!(payload["can_donate_to"].as_array().map(Vec::len), Some(8));
        assert_eq!(payload["can_receive_from"], json!(["O-"]));
    }

    #[tokio::test]
    async fn compatibility_endpoint_rejects_unknown_groups() {
        let response = compatibility_endpoint(Path("Q+".to_string())).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = body_json(response).await;
        assert!(payload["error"]
            .as_str()
            .expect("error message")
            .contains("Q+"));
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(payload) = healthcheck().await;
        assert_eq!(payload["status"], "ok");
    }
}
