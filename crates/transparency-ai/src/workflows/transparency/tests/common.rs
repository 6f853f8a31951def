use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::transparency::catalog::BaseField;
use crate::workflows::transparency::domain::{
    AnsweredQuestionnaire, ProductDraft, QuestionSpec, ScoreResult, Submission, SubmissionId,
    SubmitterProfile,
};
use crate::workflows::transparency::provider::{
    LocalProvider, ProviderError, RemoteError, TransparencyProvider,
};
use crate::workflows::transparency::repository::{
    CurrentUserProvider, RepositoryError, SubmissionRepository,
};
use crate::workflows::transparency::service::SubmissionService;

pub(super) const LONG_TEXT: &str = "Single-origin leaves picked by hand on certified smallholder farms in Uji, steamed within hours of harvest and stone-milled.";

pub(super) fn organic_green_tea() -> ProductDraft {
    ProductDraft::new("Organic Green Tea", "Food & Beverages")
        .with_field(BaseField::Ingredients, "Organic green tea leaves")
}

pub(super) fn sparse_draft() -> ProductDraft {
    ProductDraft::new("Organic Green Tea", "Food & Beverages")
}

pub(super) fn detailed_draft() -> ProductDraft {
    let mut draft = ProductDraft::default();
    for field in BaseField::SCORED {
        draft.set_field(field, format!("{} {LONG_TEXT}", field.key()));
    }
    draft.with_field(
        BaseField::Certifications,
        "USDA Organic, EU Organic and Fair Trade certified since 2019, audited yearly",
    )
}

/// Long answers for three dynamic questions, enough to fill their slots.
pub(super) fn detailed_answers() -> AnsweredQuestionnaire {
    AnsweredQuestionnaire::new()
        .with_answer("nutritional_info", LONG_TEXT)
        .with_answer("allergen_testing", LONG_TEXT)
        .with_answer("organic_certification", LONG_TEXT)
}

/// Answers every required question generated for [`organic_green_tea`].
pub(super) fn required_answers() -> AnsweredQuestionnaire {
    AnsweredQuestionnaire::new()
        .with_answer("nutritional_info", "40 kcal per 100 g, no added sugar")
        .with_answer("shelf_life", "6-12 months")
        .with_answer("allergen_testing", "Dedicated line, quarterly swab tests")
        .with_answer("organic_certification", "EU Organic, certificate DE-ÖKO-006")
        .with_answer("supplier_audit_frequency", "Quarterly")
        .with_answer("traceability_level", "Complete traceability")
}

pub(super) fn canned_score(score: u8) -> ScoreResult {
    ScoreResult {
        score,
        raw_points: u32::from(score),
        max_points: 100,
        insights: vec!["canned".to_string()],
        computed_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub(super) fn canned_questions() -> Vec<QuestionSpec> {
    vec![QuestionSpec {
        id: "canned".to_string(),
        prompt: "Canned?".to_string(),
        input_kind: crate::workflows::transparency::domain::InputKind::ShortText,
        options: Vec::new(),
        required: false,
        topic_tag: None,
    }]
}

/// Provider that answers with fixed values and counts its calls.
#[derive(Default)]
pub(super) struct CannedProvider {
    pub(super) calls: AtomicUsize,
}

impl CannedProvider {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransparencyProvider for CannedProvider {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn generate_questions(
        &self,
        _draft: &ProductDraft,
    ) -> Result<Vec<QuestionSpec>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(canned_questions())
    }

    async fn compute_score(
        &self,
        _draft: &ProductDraft,
        _answers: &AnsweredQuestionnaire,
    ) -> Result<ScoreResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(canned_score(42))
    }
}

/// Provider standing in for an unreachable scoring service.
#[derive(Default)]
pub(super) struct OfflineProvider {
    pub(super) calls: AtomicUsize,
}

impl OfflineProvider {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> ProviderError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        RemoteError::Rejected("service offline".to_string()).into()
    }
}

#[async_trait]
impl TransparencyProvider for OfflineProvider {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn generate_questions(
        &self,
        _draft: &ProductDraft,
    ) -> Result<Vec<QuestionSpec>, ProviderError> {
        Err(self.fail())
    }

    async fn compute_score(
        &self,
        _draft: &ProductDraft,
        _answers: &AnsweredQuestionnaire,
    ) -> Result<ScoreResult, ProviderError> {
        Err(self.fail())
    }
}

/// Local-style provider that always errors.
pub(super) struct BrokenProvider;

#[async_trait]
impl TransparencyProvider for BrokenProvider {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn generate_questions(
        &self,
        _draft: &ProductDraft,
    ) -> Result<Vec<QuestionSpec>, ProviderError> {
        Err(ProviderError::Local("rule tables unavailable".to_string()))
    }

    async fn compute_score(
        &self,
        _draft: &ProductDraft,
        _answers: &AnsweredQuestionnaire,
    ) -> Result<ScoreResult, ProviderError> {
        Err(ProviderError::Local("rule tables unavailable".to_string()))
    }
}

/// Generates the local questionnaire but cannot score.
pub(super) struct ScoringOutageProvider;

#[async_trait]
impl TransparencyProvider for ScoringOutageProvider {
    fn name(&self) -> &'static str {
        "scoring-outage"
    }

    async fn generate_questions(
        &self,
        draft: &ProductDraft,
    ) -> Result<Vec<QuestionSpec>, ProviderError> {
        LocalProvider.generate_questions(draft).await
    }

    async fn compute_score(
        &self,
        _draft: &ProductDraft,
        _answers: &AnsweredQuestionnaire,
    ) -> Result<ScoreResult, ProviderError> {
        Err(ProviderError::Local("rule tables unavailable".to_string()))
    }
}

/// Answers correctly, but only after `delay`.
pub(super) struct SlowProvider {
    pub(super) delay: Duration,
}

#[async_trait]
impl TransparencyProvider for SlowProvider {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn generate_questions(
        &self,
        draft: &ProductDraft,
    ) -> Result<Vec<QuestionSpec>, ProviderError> {
        tokio::time::sleep(self.delay).await;
        LocalProvider.generate_questions(draft).await
    }

    async fn compute_score(
        &self,
        _draft: &ProductDraft,
        _answers: &AnsweredQuestionnaire,
    ) -> Result<ScoreResult, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(canned_score(99))
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) records: Mutex<HashMap<SubmissionId, Submission>>,
}

impl MemoryRepository {
    pub(super) fn stored(&self, id: &SubmissionId) -> Option<Submission> {
        self.records.lock().unwrap().get(id).cloned()
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl SubmissionRepository for MemoryRepository {
    fn insert(&self, submission: Submission) -> Result<Submission, RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        if guard.contains_key(&submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    fn update(&self, submission: Submission) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        if !guard.contains_key(&submission.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(submission.id.clone(), submission);
        Ok(())
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }
}

pub(super) struct ConflictRepository;

impl SubmissionRepository for ConflictRepository {
    fn insert(&self, _submission: Submission) -> Result<Submission, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _submission: Submission) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableRepository;

impl SubmissionRepository for UnavailableRepository {
    fn insert(&self, _submission: Submission) -> Result<Submission, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _submission: Submission) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct StaticUser(pub(super) Option<SubmitterProfile>);

impl CurrentUserProvider for StaticUser {
    fn current_user(&self) -> Option<SubmitterProfile> {
        self.0.clone()
    }
}

pub(super) fn submitter() -> SubmitterProfile {
    SubmitterProfile {
        id: "user-7".to_string(),
        email: "quality@leafy.example".to_string(),
        company: "Leafy Co".to_string(),
    }
}

pub(super) fn build_service(
    provider: Arc<dyn TransparencyProvider>,
) -> (
    SubmissionService<MemoryRepository, StaticUser>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let users = Arc::new(StaticUser(Some(submitter())));
    let service = SubmissionService::new(provider, repository.clone(), users);
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
