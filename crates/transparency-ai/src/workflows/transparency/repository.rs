use serde::Serialize;

use super::domain::{Submission, SubmissionId, SubmissionStatus};

/// Storage abstraction so the submission service can be exercised in isolation.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, submission: Submission) -> Result<Submission, RepositoryError>;
    fn update(&self, submission: Submission) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Session lookup supplied by the authentication layer.
pub trait CurrentUserProvider: Send + Sync {
    fn current_user(&self) -> Option<super::domain::SubmitterProfile>;
}

/// Sanitized representation of a submission for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStatusView {
    pub submission_id: SubmissionId,
    pub product_name: String,
    pub category: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub insights: Vec<String>,
}

impl Submission {
    pub fn status_view(&self) -> SubmissionStatusView {
        SubmissionStatusView {
            submission_id: self.id.clone(),
            product_name: self.draft.product_name.clone(),
            category: self.draft.category().label(),
            status: self.status.label(),
            score: self.score.as_ref().map(|result| result.score),
            insights: self
                .score
                .as_ref()
                .map(|result| result.insights.clone())
                .unwrap_or_default(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }
}
