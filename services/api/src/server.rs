use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;
use vaccine_card::config::AppConfig;
use vaccine_card::error::AppError;
use vaccine_card::registry::Registry;
use vaccine_card::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPersonStore, InMemoryVaccinationStore, InMemoryVaccineStore};
use crate::routes::with_registry_routes;

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

    let registry = Arc::new(Registry::new(
        Arc::new(InMemoryPersonStore::default()),
        Arc::new(InMemoryVaccineStore::default()),
        Arc::new(InMemoryVaccinationStore::default()),
    ));

    let app = with_registry_routes(registry)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "vaccination registry ready");

    axum::serve(listener, app).await?;
    Ok(())
}
