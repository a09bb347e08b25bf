use candidate_verifier::config::VerificationConfig;
use candidate_verifier::error::AppError;
use candidate_verifier::workflows::candidate::{
    CandidateData, CandidateVerificationService, ExternalVerifier, FieldVerificationResult,
    InMemoryApplicationStore, PassThroughVerifier, SimulatedVerifier, VerificationOrchestrator,
    VerifierError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Verifier selected from configuration at startup.
#[derive(Debug)]
pub(crate) enum ConfiguredVerifier {
    PassThrough(PassThroughVerifier),
    Simulated(SimulatedVerifier),
}

impl ConfiguredVerifier {
    pub(crate) fn from_config(config: &VerificationConfig) -> Self {
        if config.simulate_external_checks {
            Self::Simulated(SimulatedVerifier::new(config.rng_seed))
        } else {
            Self::PassThrough(PassThroughVerifier)
        }
    }
}

pub(crate) fn verifier_label(config: &VerificationConfig) -> &'static str {
    if config.simulate_external_checks {
        "simulated external checks"
    } else {
        "rule-based"
    }
}

impl ExternalVerifier for ConfiguredVerifier {
    fn verify(
        &self,
        candidate: &CandidateData,
        baseline: FieldVerificationResult,
    ) -> impl Future<Output = Result<FieldVerificationResult, VerifierError>> + Send {
        async move {
            match self {
                Self::PassThrough(verifier) => verifier.verify(candidate, baseline).await,
                Self::Simulated(verifier) => verifier.verify(candidate, baseline).await,
            }
        }
    }
}

pub(crate) type ApiService =
    CandidateVerificationService<InMemoryApplicationStore, ConfiguredVerifier>;

pub(crate) fn build_orchestrator(
    config: &VerificationConfig,
) -> VerificationOrchestrator<ConfiguredVerifier> {
    VerificationOrchestrator::new(
        Arc::new(ConfiguredVerifier::from_config(config)),
        config.threshold_policy,
    )
    .with_field_latency(config.field_latency)
}

pub(crate) fn build_service(config: &VerificationConfig) -> Arc<ApiService> {
    Arc::new(CandidateVerificationService::new(
        Arc::new(InMemoryApplicationStore::default()),
        Arc::new(build_orchestrator(config)),
    ))
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
