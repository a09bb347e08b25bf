//! Candidate intake, field verification, scoring, and application storage.
//!
//! A verification run scores six fields with deterministic rules, passes each
//! result through an [`ExternalVerifier`], and aggregates the outcome under a
//! [`ThresholdPolicy`]. Saved applications live behind [`ApplicationStore`].

pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod orchestrator;
pub mod questionnaire;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod validators;
pub mod verifier;

#[cfg(test)]
mod tests;

pub use domain::{
    AdditionalAnswers, ApplicationId, CandidateData, FieldId, FieldStatus,
    FieldVerificationResult, OverallStatus, SavedApplication, VerificationResult,
};
pub use evaluation::{FieldScorer, ThresholdPolicy, VerificationRules};
pub use intake::{validate_candidate, IntakeRejection};
pub use orchestrator::VerificationOrchestrator;
pub use questionnaire::{validate_answers, IncompleteAnswers, QUESTIONS};
pub use report::VerificationReport;
pub use repository::{ApplicationStore, InMemoryApplicationStore, RepositoryError};
pub use router::verification_router;
pub use service::{CandidateVerificationService, VerificationServiceError};
pub use verifier::{
    ExternalVerifier, InconclusiveOdds, PassThroughVerifier, SimulatedVerifier, VerifierError,
};
