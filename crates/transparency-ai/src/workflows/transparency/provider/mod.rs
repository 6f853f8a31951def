//! Question generation and scoring behind a single capability trait.
//!
//! [`LocalProvider`] runs the rule tables in-process, [`RemoteProvider`] calls
//! the scoring service over HTTP, and [`FallbackProvider`] tries one and then
//! the other so callers only see an error when both paths fail.

mod fallback;
mod local;
mod remote;
pub mod wire;

pub use fallback::{FallbackProvider, Resolution, Resolved};
pub use local::LocalProvider;
pub use remote::{RemoteError, RemoteProvider};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::domain::{AnsweredQuestionnaire, ProductDraft, QuestionSpec, ScoreResult};
use crate::config::ScoringServiceConfig;

#[async_trait]
pub trait TransparencyProvider: Send + Sync {
    /// Short identifier used in logs and status payloads.
    fn name(&self) -> &'static str;

    /// Human-readable provider chain, e.g. `remote+local`.
    fn describe(&self) -> String {
        self.name().to_string()
    }

    async fn generate_questions(
        &self,
        draft: &ProductDraft,
    ) -> Result<Vec<QuestionSpec>, ProviderError>;

    async fn compute_score(
        &self,
        draft: &ProductDraft,
        answers: &AnsweredQuestionnaire,
    ) -> Result<ScoreResult, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("scoring service unavailable: {0}")]
    RemoteUnavailable(#[from] RemoteError),
    #[error("scoring service did not answer within {0:?}")]
    TimedOut(Duration),
    #[error("local computation failed: {0}")]
    Local(String),
    #[error("{operation} failed on every provider (primary: {primary}; fallback: {fallback})")]
    FallbackExhausted {
        operation: &'static str,
        primary: Box<ProviderError>,
        fallback: Box<ProviderError>,
    },
}

impl ProviderError {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, ProviderError::FallbackExhausted { .. })
    }
}

/// Builds the provider chain for a deployment: remote with local fallback
/// when a scoring service is configured, local-only otherwise.
pub fn provider_from_config(
    config: &ScoringServiceConfig,
) -> Result<Arc<dyn TransparencyProvider>, RemoteError> {
    match &config.base_url {
        Some(base_url) => {
            let remote = RemoteProvider::new(base_url.clone(), config.timeout)?;
            Ok(Arc::new(FallbackProvider::new(
                Arc::new(remote),
                Arc::new(LocalProvider),
                config.timeout,
            )))
        }
        None => Ok(Arc::new(LocalProvider)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_without_url_is_local_only() {
        let provider =
            provider_from_config(&ScoringServiceConfig::default()).expect("local provider");
        assert_eq!(provider.name(), "local");
        assert_eq!(provider.describe(), "local");
    }

    #[test]
    fn config_with_url_composes_fallback_chain() {
        let config = ScoringServiceConfig {
            base_url: Some("http://127.0.0.1:5000".to_string()),
            timeout: Duration::from_millis(250),
        };
        let provider = provider_from_config(&config).expect("fallback chain");
        assert_eq!(provider.name(), "fallback");
        assert_eq!(provider.describe(), "remote+local");
    }
}
