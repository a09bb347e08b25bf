use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::domain::{
    AdditionalAnswers, ApplicationId, CandidateData, SavedApplication, VerificationResult,
};
use super::evaluation::VerificationRules;
use super::orchestrator::VerificationOrchestrator;
use super::repository::{ApplicationStore, RepositoryError};
use super::verifier::{ExternalVerifier, VerifierError};

/// Service composing the verification orchestrator and the application store.
pub struct CandidateVerificationService<S, V> {
    store: Arc<S>,
    orchestrator: Arc<VerificationOrchestrator<V>>,
    default_rules: VerificationRules,
}

fn next_application_id() -> ApplicationId {
    ApplicationId(Uuid::new_v4().to_string())
}

impl<S, V> CandidateVerificationService<S, V>
where
    S: ApplicationStore + 'static,
    V: ExternalVerifier + 'static,
{
    pub fn new(store: Arc<S>, orchestrator: Arc<VerificationOrchestrator<V>>) -> Self {
        Self {
            store,
            orchestrator,
            default_rules: VerificationRules::default(),
        }
    }

    /// Rules applied when a request does not carry its own.
    pub fn with_default_rules(mut self, rules: VerificationRules) -> Self {
        self.default_rules = rules;
        self
    }

    pub fn default_rules(&self) -> &VerificationRules {
        &self.default_rules
    }

    /// Run a verification pass for a candidate.
    pub async fn verify(
        &self,
        candidate: &CandidateData,
        rules: Option<&VerificationRules>,
    ) -> Result<VerificationResult, VerificationServiceError> {
        let rules = rules.unwrap_or(&self.default_rules);
        let result = self.orchestrator.verify(candidate, rules).await?;

        info!(
            overall_score = result.overall_score,
            status = result.status.label(),
            "verification completed"
        );
        Ok(result)
    }

    /// Persist a finished application stamped with the current time.
    pub fn save(
        &self,
        candidate: CandidateData,
        verification: VerificationResult,
        answers: AdditionalAnswers,
    ) -> Result<SavedApplication, VerificationServiceError> {
        self.save_at(candidate, verification, answers, Utc::now())
    }

    pub fn save_at(
        &self,
        candidate: CandidateData,
        verification: VerificationResult,
        answers: AdditionalAnswers,
        timestamp: DateTime<Utc>,
    ) -> Result<SavedApplication, VerificationServiceError> {
        let record = SavedApplication {
            id: next_application_id(),
            status: verification.status,
            candidate_data: candidate,
            verification_result: verification,
            additional_answers: answers,
            timestamp,
        };

        let stored = self.store.put(record)?;
        info!(application_id = %stored.id, status = stored.status.label(), "application saved");
        Ok(stored)
    }

    /// Fetch a single saved application.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<SavedApplication, VerificationServiceError> {
        self.store
            .get(application_id)?
            .ok_or_else(|| VerificationServiceError::NotFound(application_id.clone()))
    }

    /// Every saved application, newest first.
    pub fn list(&self) -> Result<Vec<SavedApplication>, VerificationServiceError> {
        let mut records = self.store.list()?;
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }
}

/// Error raised by the verification service.
#[derive(Debug, thiserror::Error)]
pub enum VerificationServiceError {
    #[error("application {0} not found")]
    NotFound(ApplicationId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Verifier(#[from] VerifierError),
}
