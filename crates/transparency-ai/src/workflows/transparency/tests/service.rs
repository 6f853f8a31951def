use std::sync::Arc;

use super::common::*;

use crate::workflows::transparency::domain::{QuestionSpecError, SubmissionId, SubmissionStatus};
use crate::workflows::transparency::provider::{LocalProvider, ProviderError};
use crate::workflows::transparency::repository::RepositoryError;
use crate::workflows::transparency::service::{
    SubmissionRequest, SubmissionService, SubmissionServiceError,
};

fn request() -> SubmissionRequest {
    SubmissionRequest {
        draft: organic_green_tea(),
        answers: required_answers(),
        questions: None,
    }
}

#[tokio::test]
async fn questionnaire_reports_provider_chain() {
    let (service, _) = build_service(Arc::new(LocalProvider));

    let view = service
        .questionnaire(&organic_green_tea())
        .await
        .expect("questionnaire");

    assert_eq!(view.category, "Food & Beverages");
    assert_eq!(view.provider, "local");
    assert_eq!(view.questions.len(), 8);
}

#[tokio::test]
async fn submit_scores_and_persists_completed_submission() {
    let (service, repository) = build_service(Arc::new(LocalProvider));

    let submission = service.submit(request()).await.expect("submission");

    assert_eq!(submission.status, SubmissionStatus::Completed);
    assert_eq!(submission.submitted_by, Some(submitter()));
    let score = submission.score.as_ref().expect("score attached");
    assert!(score.score <= 100);
    assert!(!score.insights.is_empty());

    let stored = repository.stored(&submission.id).expect("persisted");
    assert_eq!(stored, submission);
}

#[tokio::test]
async fn submit_discards_answers_for_questions_not_asked() {
    let (service, _) = build_service(Arc::new(LocalProvider));
    let mut request = request();
    request.answers.answer("skin_type", "Oily skin");
    request.answers.answer("brand", "Leafy Co");

    let submission = service.submit(request).await.expect("submission");

    assert!(!submission.answers.is_answered("skin_type"));
    assert!(submission.answers.is_answered("brand"));
}

#[tokio::test]
async fn submit_rejects_missing_required_answers() {
    let (service, repository) = build_service(Arc::new(LocalProvider));
    let mut request = request();
    request.answers.answer("allergen_testing", "  ");

    let error = service.submit(request).await.expect_err("incomplete");

    match error {
        SubmissionServiceError::Incomplete { missing } => {
            assert_eq!(missing, vec!["allergen_testing".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn submit_accepts_questionnaire_matching_generation() {
    let provider = Arc::new(CannedProvider::default());
    let (service, _) = build_service(provider.clone());
    let request = SubmissionRequest {
        draft: organic_green_tea(),
        answers: Default::default(),
        questions: Some(canned_questions()),
    };

    let submission = service.submit(request).await.expect("submission");

    assert_eq!(submission.score.map(|s| s.score), Some(42));
    assert_eq!(provider.calls(), 2, "questions are regenerated before scoring");
}

#[tokio::test]
async fn submit_checks_required_answers_against_generated_questions() {
    let (service, repository) = build_service(Arc::new(LocalProvider));
    let request = SubmissionRequest {
        draft: sparse_draft(),
        answers: Default::default(),
        questions: Some(Vec::new()),
    };

    let error = service.submit(request).await.expect_err("incomplete");

    match error {
        SubmissionServiceError::Incomplete { missing } => {
            assert!(missing.contains(&"shelf_life".to_string()));
            assert!(missing.contains(&"nutritional_info".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn submit_rejects_questionnaire_with_invented_questions() {
    let (service, repository) = build_service(Arc::new(LocalProvider));
    let mut shown = service
        .questionnaire(&organic_green_tea())
        .await
        .expect("questionnaire")
        .questions;
    let mut answers = required_answers();
    for index in 0..40 {
        let mut invented = canned_questions().remove(0);
        invented.id = format!("invented_{index}");
        answers.answer(invented.id.clone(), LONG_TEXT);
        shown.push(invented);
    }
    let request = SubmissionRequest {
        draft: organic_green_tea(),
        answers,
        questions: Some(shown),
    };

    let error = service.submit(request).await.expect_err("mismatch");

    assert!(matches!(
        error,
        SubmissionServiceError::InvalidQuestions(QuestionSpecError::Mismatch)
    ));
    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn submit_rejects_questionnaire_with_relaxed_required_flags() {
    let (service, _) = build_service(Arc::new(LocalProvider));
    let mut shown = service
        .questionnaire(&organic_green_tea())
        .await
        .expect("questionnaire")
        .questions;
    for question in &mut shown {
        question.required = false;
    }
    let request = SubmissionRequest {
        questions: Some(shown),
        ..request()
    };

    let error = service.submit(request).await.expect_err("mismatch");

    assert!(matches!(
        error,
        SubmissionServiceError::InvalidQuestions(QuestionSpecError::Mismatch)
    ));
}

#[tokio::test]
async fn scoring_failure_stores_nothing() {
    let (service, repository) = build_service(Arc::new(ScoringOutageProvider));

    for _ in 0..2 {
        let error = service.submit(request()).await.expect_err("provider failure");
        assert!(matches!(
            error,
            SubmissionServiceError::Provider(ProviderError::Local(_))
        ));
    }
    assert_eq!(repository.len(), 0);

    let (service, repository) = build_service(Arc::new(LocalProvider));
    let submission = service.submit(request()).await.expect("retry succeeds");
    let stored = repository.stored(&submission.id).expect("persisted");
    assert!(!stored.is_pending());
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn get_reports_missing_submissions() {
    let (service, _) = build_service(Arc::new(LocalProvider));

    let error = service
        .get(&SubmissionId("sub-missing".to_string()))
        .expect_err("missing");

    assert!(matches!(
        error,
        SubmissionServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn repository_outage_propagates() {
    let service = SubmissionService::new(
        Arc::new(LocalProvider),
        Arc::new(UnavailableRepository),
        Arc::new(StaticUser::default()),
    );

    let error = service.submit(request()).await.expect_err("outage");

    assert!(matches!(
        error,
        SubmissionServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}
