use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};

use super::catalog::BaseField;
use super::domain::{split_form_fields, AnsweredQuestionnaire, ProductDraft, SubmissionId};
use super::provider::wire::{QuestionsEnvelope, ScoreEnvelope, WireQuestion};
use super::provider::{ProviderError, TransparencyProvider};
use super::questions::template_catalog;
use super::repository::{CurrentUserProvider, RepositoryError, SubmissionRepository};
use super::service::{SubmissionRequest, SubmissionService, SubmissionServiceError};

/// Seconds clients are asked to wait after every provider failed.
pub const RETRY_AFTER_SECONDS: u64 = 30;

const SERVICE_NAME: &str = "transparency-ai";

/// Router speaking the scoring-service protocol, so this crate can stand in
/// for the remote service it otherwise consumes.
pub fn scoring_service_router(provider: Arc<dyn TransparencyProvider>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/generate-questions", post(generate_questions_handler))
        .route("/transparency-score", post(transparency_score_handler))
        .route("/questions/templates", get(templates_handler))
        .route("/ai/status", get(status_handler))
        .with_state(provider)
}

/// Router builder exposing the submission workflow.
pub fn submission_router<R, U>(service: Arc<SubmissionService<R, U>>) -> Router
where
    R: SubmissionRepository + 'static,
    U: CurrentUserProvider + 'static,
{
    Router::new()
        .route(
            "/api/v1/transparency/submissions",
            post(submit_handler::<R, U>),
        )
        .route(
            "/api/v1/transparency/submissions/:submission_id",
            get(submission_handler::<R, U>),
        )
        .with_state(service)
}

async fn health_handler(State(provider): State<Arc<dyn TransparencyProvider>>) -> Response {
    let payload = json!({
        "service": SERVICE_NAME,
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": provider.describe(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

async fn status_handler(State(provider): State<Arc<dyn TransparencyProvider>>) -> Response {
    let payload = json!({
        "success": true,
        "provider": provider.name(),
        "chain": provider.describe(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

async fn templates_handler() -> Response {
    let templates: Map<String, Value> = template_catalog()
        .into_iter()
        .map(|(category, questions)| {
            let wire: Vec<WireQuestion> = questions.iter().map(WireQuestion::from).collect();
            (category.label().to_string(), json!(wire))
        })
        .collect();

    let payload = json!({ "success": true, "templates": templates });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn generate_questions_handler(
    State(provider): State<Arc<dyn TransparencyProvider>>,
    Json(form): Json<Map<String, Value>>,
) -> Response {
    let draft = match parse_form(form) {
        Ok((draft, _)) => draft,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(QuestionsEnvelope::failed(message)),
            )
                .into_response()
        }
    };

    match provider.generate_questions(&draft).await {
        Ok(questions) => (StatusCode::OK, Json(QuestionsEnvelope::ok(&questions))).into_response(),
        Err(error) => {
            let status = provider_status(&error);
            with_retry_hint(status, Json(QuestionsEnvelope::failed(error.to_string())))
        }
    }
}

pub(crate) async fn transparency_score_handler(
    State(provider): State<Arc<dyn TransparencyProvider>>,
    Json(form): Json<Map<String, Value>>,
) -> Response {
    let (draft, answers) = match parse_form(form) {
        Ok(parsed) => parsed,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(ScoreEnvelope::failed(message))).into_response()
        }
    };

    match provider.compute_score(&draft, &answers).await {
        Ok(result) => (StatusCode::OK, Json(ScoreEnvelope::ok(&result))).into_response(),
        Err(error) => {
            let status = provider_status(&error);
            with_retry_hint(status, Json(ScoreEnvelope::failed(error.to_string())))
        }
    }
}

pub(crate) async fn submit_handler<R, U>(
    State(service): State<Arc<SubmissionService<R, U>>>,
    Json(request): Json<SubmissionRequest>,
) -> Response
where
    R: SubmissionRepository + 'static,
    U: CurrentUserProvider + 'static,
{
    match service.submit(request).await {
        Ok(submission) => {
            let view = submission.status_view();
            (StatusCode::CREATED, Json(view)).into_response()
        }
        Err(SubmissionServiceError::Incomplete { missing }) => {
            let payload = json!({
                "error": "required questions unanswered",
                "missing": missing,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(SubmissionServiceError::InvalidQuestions(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(SubmissionServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "submission already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(SubmissionServiceError::Provider(error)) => {
            let status = provider_status(&error);
            with_retry_hint(status, Json(json!({ "error": error.to_string() })))
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submission_handler<R, U>(
    State(service): State<Arc<SubmissionService<R, U>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: SubmissionRepository + 'static,
    U: CurrentUserProvider + 'static,
{
    let id = SubmissionId(submission_id);
    match service.get(&id) {
        Ok(submission) => (StatusCode::OK, Json(submission.status_view())).into_response(),
        Err(SubmissionServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "submission not found",
                "submissionId": id.0,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Splits a protocol body, rejecting it when the identifying fields are blank.
fn parse_form(
    form: Map<String, Value>,
) -> Result<(ProductDraft, AnsweredQuestionnaire), &'static str> {
    let (draft, answers) = split_form_fields(form);
    let identified = [BaseField::ProductName, BaseField::Category]
        .into_iter()
        .all(|field| !draft.field(field).trim().is_empty());
    if identified {
        Ok((draft, answers))
    } else {
        Err("productName and category are required")
    }
}

fn provider_status(error: &ProviderError) -> StatusCode {
    match error {
        ProviderError::FallbackExhausted { .. }
        | ProviderError::RemoteUnavailable(_)
        | ProviderError::TimedOut(_) => StatusCode::SERVICE_UNAVAILABLE,
        ProviderError::Local(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn with_retry_hint(status: StatusCode, body: impl IntoResponse) -> Response {
    if status == StatusCode::SERVICE_UNAVAILABLE {
        let retry_after = RETRY_AFTER_SECONDS.to_string();
        (status, [(header::RETRY_AFTER, retry_after)], body).into_response()
    } else {
        (status, body).into_response()
    }
}
