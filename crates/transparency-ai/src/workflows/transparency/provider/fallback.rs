use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, warn};

use super::super::domain::{AnsweredQuestionnaire, ProductDraft, QuestionSpec, ScoreResult};
use super::{ProviderError, TransparencyProvider};

/// Which path produced a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum Resolution {
    Primary,
    Fallback { primary_error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub served_by: &'static str,
    pub resolution: Resolution,
}

/// Tries `primary` within `primary_timeout`, then `fallback` exactly once.
///
/// Holds no state between calls: no retry counters, no circuit breaker.
pub struct FallbackProvider {
    primary: Arc<dyn TransparencyProvider>,
    fallback: Arc<dyn TransparencyProvider>,
    primary_timeout: Duration,
}

impl FallbackProvider {
    pub fn new(
        primary: Arc<dyn TransparencyProvider>,
        fallback: Arc<dyn TransparencyProvider>,
        primary_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            primary_timeout,
        }
    }

    pub async fn resolve_questions(
        &self,
        draft: &ProductDraft,
    ) -> Result<Resolved<Vec<QuestionSpec>>, ProviderError> {
        self.run(
            "question generation",
            self.primary.generate_questions(draft),
            self.fallback.generate_questions(draft),
        )
        .await
    }

    pub async fn resolve_score(
        &self,
        draft: &ProductDraft,
        answers: &AnsweredQuestionnaire,
    ) -> Result<Resolved<ScoreResult>, ProviderError> {
        self.run(
            "scoring",
            self.primary.compute_score(draft, answers),
            self.fallback.compute_score(draft, answers),
        )
        .await
    }

    async fn run<T, P, F>(
        &self,
        operation: &'static str,
        primary: P,
        fallback: F,
    ) -> Result<Resolved<T>, ProviderError>
    where
        P: Future<Output = Result<T, ProviderError>>,
        F: Future<Output = Result<T, ProviderError>>,
    {
        let primary_error = match tokio::time::timeout(self.primary_timeout, primary).await {
            Ok(Ok(value)) => {
                debug!(operation, provider = self.primary.name(), "request served");
                return Ok(Resolved {
                    value,
                    served_by: self.primary.name(),
                    resolution: Resolution::Primary,
                });
            }
            Ok(Err(err)) => err,
            Err(_) => ProviderError::TimedOut(self.primary_timeout),
        };

        warn!(
            operation,
            primary = self.primary.name(),
            fallback = self.fallback.name(),
            error = %primary_error,
            "primary provider failed, using fallback"
        );

        match fallback.await {
            Ok(value) => Ok(Resolved {
                value,
                served_by: self.fallback.name(),
                resolution: Resolution::Fallback {
                    primary_error: primary_error.to_string(),
                },
            }),
            Err(fallback_error) => {
                error!(
                    operation,
                    primary_error = %primary_error,
                    fallback_error = %fallback_error,
                    "every provider failed"
                );
                Err(ProviderError::FallbackExhausted {
                    operation,
                    primary: Box::new(primary_error),
                    fallback: Box::new(fallback_error),
                })
            }
        }
    }
}

#[async_trait]
impl TransparencyProvider for FallbackProvider {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn describe(&self) -> String {
        format!("{}+{}", self.primary.describe(), self.fallback.describe())
    }

    async fn generate_questions(
        &self,
        draft: &ProductDraft,
    ) -> Result<Vec<QuestionSpec>, ProviderError> {
        Ok(self.resolve_questions(draft).await?.value)
    }

    async fn compute_score(
        &self,
        draft: &ProductDraft,
        answers: &AnsweredQuestionnaire,
    ) -> Result<ScoreResult, ProviderError> {
        Ok(self.resolve_score(draft, answers).await?.value)
    }
}
