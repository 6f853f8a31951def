use async_trait::async_trait;

use super::super::domain::{
    validate_questions, AnsweredQuestionnaire, ProductDraft, QuestionSpec, ScoreResult,
};
use super::super::{questions, scoring};
use super::{ProviderError, TransparencyProvider};

/// Runs the static rule tables in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider;

#[async_trait]
impl TransparencyProvider for LocalProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn generate_questions(
        &self,
        draft: &ProductDraft,
    ) -> Result<Vec<QuestionSpec>, ProviderError> {
        let generated = questions::generate(draft);
        validate_questions(&generated).map_err(|err| ProviderError::Local(err.to_string()))?;
        Ok(generated)
    }

    async fn compute_score(
        &self,
        draft: &ProductDraft,
        answers: &AnsweredQuestionnaire,
    ) -> Result<ScoreResult, ProviderError> {
        let result = scoring::score(draft, answers);
        if result.score > 100 || result.insights.is_empty() {
            return Err(ProviderError::Local(format!(
                "score {} with {} insight(s) violates result bounds",
                result.score,
                result.insights.len()
            )));
        }
        Ok(result)
    }
}
