use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySubmissionRepository, StaticUserProvider};
use crate::routes::with_transparency_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use transparency_ai::config::AppConfig;
use transparency_ai::error::AppError;
use transparency_ai::telemetry;
use transparency_ai::workflows::transparency::{provider_from_config, SubmissionService};

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

    let provider = provider_from_config(&config.scoring)?;
    let provider_chain = provider.describe();
    let submission_service = Arc::new(SubmissionService::new(
        provider,
        Arc::new(InMemorySubmissionRepository::default()),
        Arc::new(StaticUserProvider::default()),
    ));

    let app = with_transparency_routes(submission_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        provider = %provider_chain,
        scoring_service = config.scoring.base_url.as_deref().unwrap_or("none"),
        "transparency scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
