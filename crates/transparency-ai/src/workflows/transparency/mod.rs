//! Product transparency questionnaires and scoring.
//!
//! Rule tables live in [`questions`], [`scoring`] and [`insights`]; the
//! [`provider`] layer decides whether they run in-process or behind the
//! remote scoring service. [`service::SubmissionService`] persists scored
//! submissions and the routers expose both over HTTP.

pub mod catalog;
pub mod domain;
pub mod insights;
pub mod provider;
pub mod questions;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{BaseField, ProductCategory};
pub use domain::{
    split_form_fields, validate_questions, AnsweredQuestionnaire, InputKind, ProductDraft,
    QuestionSpec, QuestionSpecError, ScoreResult, Submission, SubmissionId,
    SubmissionStateError, SubmissionStatus, SubmitterProfile,
};
pub use provider::{
    provider_from_config, FallbackProvider, LocalProvider, ProviderError, RemoteError,
    RemoteProvider, Resolution, Resolved, TransparencyProvider,
};
pub use repository::{
    CurrentUserProvider, RepositoryError, SubmissionRepository, SubmissionStatusView,
};
pub use router::{scoring_service_router, submission_router};
pub use service::{
    QuestionnaireView, SubmissionRequest, SubmissionService, SubmissionServiceError,
};
