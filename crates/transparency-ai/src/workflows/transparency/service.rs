use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{
    ensure_same_questionnaire, validate_questions, AnsweredQuestionnaire, ProductDraft, QuestionSpec, QuestionSpecError,
    Submission, SubmissionId, SubmissionStateError,
};
use super::provider::{ProviderError, TransparencyProvider};
use super::repository::{CurrentUserProvider, RepositoryError, SubmissionRepository};

/// Payload accepted by [`SubmissionService::submit`].
///
/// `questions` is the questionnaire the submitter was shown. The service always
/// regenerates the questions from the draft, and a supplied list must match
/// them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub draft: ProductDraft,
    #[serde(default)]
    pub answers: AnsweredQuestionnaire,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionSpec>>,
}

/// Questionnaire for a draft plus the provider chain that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireView {
    pub category: &'static str,
    pub provider: String,
    pub questions: Vec<QuestionSpec>,
}

/// Service composing the provider chain, submission store and user lookup.
pub struct SubmissionService<R, U> {
    provider: Arc<dyn TransparencyProvider>,
    repository: Arc<R>,
    users: Arc<U>,
}

impl<R, U> SubmissionService<R, U>
where
    R: SubmissionRepository + 'static,
    U: CurrentUserProvider + 'static,
{
    pub fn new(provider: Arc<dyn TransparencyProvider>, repository: Arc<R>, users: Arc<U>) -> Self {
        Self {
            provider,
            repository,
            users,
        }
    }

    pub fn provider(&self) -> &Arc<dyn TransparencyProvider> {
        &self.provider
    }

    /// Generate the follow-up questions for a draft.
    pub async fn questionnaire(
        &self,
        draft: &ProductDraft,
    ) -> Result<QuestionnaireView, SubmissionServiceError> {
        let questions = self.provider.generate_questions(draft).await?;
        info!(
            provider = %self.provider.describe(),
            category = draft.category().label(),
            questions = questions.len(),
            "questionnaire generated"
        );
        Ok(QuestionnaireView {
            category: draft.category().label(),
            provider: self.provider.describe(),
            questions,
        })
    }

    /// Score a completed questionnaire and persist the submission.
    ///
    /// Nothing is stored until scoring succeeds. The record is then inserted
    /// as pending and marked completed once the score is attached.
    pub async fn submit(
        &self,
        request: SubmissionRequest,
    ) -> Result<Submission, SubmissionServiceError> {
        let SubmissionRequest {
            draft,
            mut answers,
            questions: shown,
        } = request;

        let questions = self.provider.generate_questions(&draft).await?;
        validate_questions(&questions)?;

        let discarded = answers.retain_generated(&questions);
        if !discarded.is_empty() {
            debug!(?discarded, "dropped answers to questions no longer asked");
        }

        let missing: Vec<String> = answers
            .missing_required(&questions)
            .into_iter()
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(SubmissionServiceError::Incomplete { missing });
        }

        if let Some(shown) = shown {
            ensure_same_questionnaire(&shown, &questions)?;
        }

        let result = self.provider.compute_score(&draft, &answers).await?;

        let submitter = self.users.current_user();
        let mut submission = self
            .repository
            .insert(Submission::pending(draft, answers, submitter))?;
        submission.complete(result)?;
        self.repository.update(submission.clone())?;

        info!(
            submission_id = %submission.id,
            category = submission.draft.category().label(),
            score = submission.score.as_ref().map(|result| result.score),
            "submission scored"
        );
        Ok(submission)
    }

    /// Fetch a submission for API responses.
    pub fn get(&self, id: &SubmissionId) -> Result<Submission, SubmissionServiceError> {
        let submission = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(submission)
    }
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionServiceError {
    #[error("required questions unanswered: {}", .missing.join(", "))]
    Incomplete { missing: Vec<String> },
    #[error("questionnaire is invalid: {0}")]
    InvalidQuestions(#[from] QuestionSpecError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    State(#[from] SubmissionStateError),
}
