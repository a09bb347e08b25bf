use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use super::domain::{CandidateData, FieldId, FieldVerificationResult, VerificationResult};
use super::evaluation::{aggregate, FieldScorer, ThresholdPolicy, VerificationRules};
use super::verifier::{ExternalVerifier, VerifierError};

/// Sequences the six field checks, scoring each deterministically and then
/// handing it to the external verifier.
pub struct VerificationOrchestrator<V> {
    verifier: Arc<V>,
    policy: ThresholdPolicy,
    field_latency: Duration,
}

impl<V> VerificationOrchestrator<V>
where
    V: ExternalVerifier + 'static,
{
    pub fn new(verifier: Arc<V>, policy: ThresholdPolicy) -> Self {
        Self {
            verifier,
            policy,
            field_latency: Duration::ZERO,
        }
    }

    /// Pause before each field check, mimicking a remote lookup. Zero disables it.
    pub fn with_field_latency(mut self, latency: Duration) -> Self {
        self.field_latency = latency;
        self
    }

    pub fn policy(&self) -> ThresholdPolicy {
        self.policy
    }

    /// Run every field check and return the aggregated result.
    pub async fn verify(
        &self,
        candidate: &CandidateData,
        rules: &VerificationRules,
    ) -> Result<VerificationResult, VerifierError> {
        self.run(candidate, rules, None).await
    }

    /// Like [`verify`](Self::verify), additionally sending each field result to
    /// `progress` as soon as it resolves. A dropped receiver does not abort the run.
    pub async fn verify_streaming(
        &self,
        candidate: &CandidateData,
        rules: &VerificationRules,
        progress: mpsc::Sender<FieldVerificationResult>,
    ) -> Result<VerificationResult, VerifierError> {
        self.run(candidate, rules, Some(progress)).await
    }

    async fn run(
        &self,
        candidate: &CandidateData,
        rules: &VerificationRules,
        progress: Option<mpsc::Sender<FieldVerificationResult>>,
    ) -> Result<VerificationResult, VerifierError> {
        let scorer = FieldScorer::new(rules.clone());
        let mut field_results = Vec::with_capacity(FieldId::VERIFICATION_ORDER.len());

        for field in FieldId::VERIFICATION_ORDER {
            if !self.field_latency.is_zero() {
                tokio::time::sleep(self.field_latency).await;
            }

            let baseline = scorer.score(field, candidate);
            let result = self.verifier.verify(candidate, baseline).await?;
            debug!(
                field = field.key(),
                status = result.status.label(),
                score = result.score,
                "field check resolved"
            );

            if let Some(sender) = &progress {
                if sender.send(result.clone()).await.is_err() {
                    debug!(field = field.key(), "progress receiver dropped");
                }
            }
            field_results.push(result);
        }

        Ok(aggregate(field_results, self.policy))
    }
}
