use crate::cli::ServeArgs;
use crate::infra::{
    default_eligibility_config, AppState, InMemoryNotificationPublisher,
    InMemoryRegistrationRepository,
};
use crate::routes::with_registration_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use hemolink::config::AppConfig;
use hemolink::error::AppError;
use hemolink::telemetry;
use hemolink::workflows::donation::registration::DonationRegistrationService;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryRegistrationRepository::default());
    let notifications = Arc::new(InMemoryNotificationPublisher::default());
    let eligibility_config = default_eligibility_config();
    let registration_service = Arc::new(DonationRegistrationService::new(
        repository,
        notifications,
        eligibility_config,
    ));

    let app = with_registration_routes(registration_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "donor intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
