use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use transparency_ai::workflows::transparency::{
    CurrentUserProvider, RepositoryError, Submission, SubmissionId, SubmissionRepository,
    SubmitterProfile,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRepository {
    records: Arc<Mutex<HashMap<SubmissionId, Submission>>>,
}

impl InMemorySubmissionRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SubmissionId, Submission>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(&self, submission: Submission) -> Result<Submission, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    fn update(&self, submission: Submission) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&submission.id) {
            guard.insert(submission.id.clone(), submission);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }
}

/// Fixed session lookup; authentication lives in front of this service.
#[derive(Default, Clone)]
pub(crate) struct StaticUserProvider {
    profile: Option<SubmitterProfile>,
}

impl StaticUserProvider {
    pub(crate) fn signed_in(profile: SubmitterProfile) -> Self {
        Self {
            profile: Some(profile),
        }
    }
}

impl CurrentUserProvider for StaticUserProvider {
    fn current_user(&self) -> Option<SubmitterProfile> {
        self.profile.clone()
    }
}
