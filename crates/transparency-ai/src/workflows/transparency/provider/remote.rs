use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::super::domain::{
    validate_questions, AnsweredQuestionnaire, ProductDraft, QuestionSpec, QuestionSpecError,
    ScoreResult,
};
use super::wire::{QuestionsEnvelope, ScoreEnvelope, WireError};
use super::{ProviderError, TransparencyProvider};

/// HTTP client for the scoring service.
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Network, DNS, TLS, timeout or body decoding failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("scoring service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("scoring service reported failure: {0}")]
    Rejected(String),
    #[error("scoring service response is missing `{0}`")]
    MissingPayload(&'static str),
    #[error("scoring service returned invalid questions: {0}")]
    InvalidQuestions(#[from] QuestionSpecError),
    #[error("scoring service returned an invalid score: {0}")]
    InvalidScore(#[from] WireError),
}

impl RemoteProvider {
    /// `base_url` is the service root, e.g. `http://scoring:5000`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuses an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`; any 2xx counts as alive.
    pub async fn health(&self) -> Result<(), RemoteError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    pub async fn fetch_questions(
        &self,
        draft: &ProductDraft,
    ) -> Result<Vec<QuestionSpec>, RemoteError> {
        let envelope: QuestionsEnvelope = self
            .post("generate-questions", &draft.to_form_map())
            .await?;

        if !envelope.success {
            return Err(RemoteError::Rejected(
                envelope.error.unwrap_or_else(|| "unspecified error".to_string()),
            ));
        }

        let questions: Vec<QuestionSpec> = envelope
            .questions
            .ok_or(RemoteError::MissingPayload("questions"))?
            .into_iter()
            .enumerate()
            .map(|(position, question)| question.into_spec(position))
            .collect();

        if questions.is_empty() {
            return Err(RemoteError::MissingPayload("questions"));
        }
        validate_questions(&questions)?;
        Ok(questions)
    }

    pub async fn fetch_score(
        &self,
        draft: &ProductDraft,
        answers: &AnsweredQuestionnaire,
    ) -> Result<ScoreResult, RemoteError> {
        let envelope: ScoreEnvelope = self
            .post("transparency-score", &flatten(draft, answers))
            .await?;

        if !envelope.success {
            return Err(RemoteError::Rejected(
                envelope.error.unwrap_or_else(|| "unspecified error".to_string()),
            ));
        }

        let result = envelope
            .result
            .ok_or(RemoteError::MissingPayload("result"))?
            .into_result(Utc::now())?;
        Ok(result)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Draft fields plus dynamic answers in one flat map. Answers never override
/// a base field of the same name.
fn flatten(draft: &ProductDraft, answers: &AnsweredQuestionnaire) -> BTreeMap<String, String> {
    let mut form = draft.to_form_map();
    for (id, value) in answers.answered() {
        form.entry(id.to_string())
            .or_insert_with(|| value.to_string());
    }
    form
}

#[async_trait]
impl TransparencyProvider for RemoteProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn generate_questions(
        &self,
        draft: &ProductDraft,
    ) -> Result<Vec<QuestionSpec>, ProviderError> {
        Ok(self.fetch_questions(draft).await?)
    }

    async fn compute_score(
        &self,
        draft: &ProductDraft,
        answers: &AnsweredQuestionnaire,
    ) -> Result<ScoreResult, ProviderError> {
        Ok(self.fetch_score(draft, answers).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_keeps_base_fields_authoritative() {
        let draft = ProductDraft::new("Tea", "Food & Beverages");
        let answers = AnsweredQuestionnaire::new()
            .with_answer("productName", "Overridden")
            .with_answer("shelf_life", "1-3 months")
            .with_answer("preservatives", "  ");

        let form = flatten(&draft, &answers);

        assert_eq!(form.get("productName").map(String::as_str), Some("Tea"));
        assert_eq!(form.get("shelf_life").map(String::as_str), Some("1-3 months"));
        assert!(!form.contains_key("preservatives"));
        assert_eq!(form.len(), 9);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = RemoteProvider::with_client(reqwest::Client::new(), "http://svc:5000/");
        assert_eq!(provider.base_url(), "http://svc:5000");
    }

    #[test]
    fn status_error_mentions_code() {
        let err = RemoteError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "scoring service returned HTTP 502: bad gateway"
        );
    }
}
