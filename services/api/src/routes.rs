use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use transparency_ai::workflows::transparency::{
    scoring_service_router, submission_router, CurrentUserProvider, SubmissionRepository,
    SubmissionService,
};

/// Scoring protocol, submission workflow and operational endpoints on one router.
pub(crate) fn with_transparency_routes<R, U>(service: Arc<SubmissionService<R, U>>) -> axum::Router
where
    R: SubmissionRepository + 'static,
    U: CurrentUserProvider + 'static,
{
    let provider = service.provider().clone();
    submission_router(service)
        .merge(scoring_service_router(provider))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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
