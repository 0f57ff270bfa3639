use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemorySessionRepository, InMemorySubmissionSink, StateMedicationCatalog,
};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use rx_intake::config::AppConfig;
use rx_intake::error::AppError;
use rx_intake::flows::intake::IntakeService;
use rx_intake::telemetry;
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

    let repository = Arc::new(InMemorySessionRepository::default());
    let sink = Arc::new(InMemorySubmissionSink::default());
    let catalog = Arc::new(StateMedicationCatalog::with_default_listings());
    let intake_service = Arc::new(IntakeService::new(repository, sink, catalog));

    let app = with_intake_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "prescription intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
