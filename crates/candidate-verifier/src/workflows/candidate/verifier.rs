//! Seam for third-party confirmation of a field that already passed the
//! deterministic rules. The pass-through verifier keeps the rule-based score
//! as the system of record; the simulated verifier stands in for identity,
//! postal, and registrar lookups until real integrations exist.

use std::future::{ready, Future};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::domain::{CandidateData, FieldId, FieldStatus, FieldVerificationResult};

/// Confirms or downgrades a rule-based field result.
pub trait ExternalVerifier: Send + Sync {
    fn verify(
        &self,
        candidate: &CandidateData,
        baseline: FieldVerificationResult,
    ) -> impl Future<Output = Result<FieldVerificationResult, VerifierError>> + Send;
}

/// Failure talking to the verification backend. Distinct from a field that
/// does not verify, which is reported as an error-status result.
#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    #[error("verification backend unavailable: {0}")]
    Unavailable(String),
}

/// Accepts the rule-based outcome unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughVerifier;

impl ExternalVerifier for PassThroughVerifier {
    fn verify(
        &self,
        _candidate: &CandidateData,
        baseline: FieldVerificationResult,
    ) -> impl Future<Output = Result<FieldVerificationResult, VerifierError>> + Send {
        ready(Ok(baseline))
    }
}

/// How a successful field is downgraded when the simulated lookup comes back
/// inconclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Downgrade {
    pub probability: f64,
    pub score: u8,
    pub message: &'static str,
    pub details: Option<&'static str>,
}

/// Per-field inconclusive odds used by [`SimulatedVerifier`].
#[derive(Debug, Clone, PartialEq)]
pub struct InconclusiveOdds {
    pub email: Downgrade,
    pub phone: Downgrade,
    pub education: Downgrade,
    pub address: Downgrade,
}

impl Default for InconclusiveOdds {
    fn default() -> Self {
        Self {
            email: Downgrade {
                probability: 0.10,
                score: 70,
                message: "Domain verification inconclusive",
                details: Some("Unable to verify domain authenticity"),
            },
            phone: Downgrade {
                probability: 0.05,
                score: 60,
                message: "Phone number verification inconclusive",
                details: None,
            },
            education: Downgrade {
                probability: 0.15,
                score: 70,
                message: "Education verification inconclusive",
                details: Some("Unable to verify with educational institutions"),
            },
            address: Downgrade {
                probability: 0.10,
                score: 75,
                message: "Address verification inconclusive",
                details: Some("Unable to verify with postal services"),
            },
        }
    }
}

impl InconclusiveOdds {
    /// Same downgrade targets as the defaults with every probability set to `p`.
    pub fn uniform(probability: f64) -> Self {
        let mut odds = Self::default();
        for downgrade in [
            &mut odds.email,
            &mut odds.phone,
            &mut odds.education,
            &mut odds.address,
        ] {
            downgrade.probability = probability.clamp(0.0, 1.0);
        }
        odds
    }

    fn for_field(&self, field: FieldId) -> Option<&Downgrade> {
        match field {
            FieldId::Email => Some(&self.email),
            FieldId::Phone => Some(&self.phone),
            FieldId::Education => Some(&self.education),
            FieldId::Address => Some(&self.address),
            _ => None,
        }
    }
}

/// Randomised stand-in for external confirmation.
#[derive(Debug)]
pub struct SimulatedVerifier {
    rng: Mutex<StdRng>,
    odds: InconclusiveOdds,
}

impl SimulatedVerifier {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_odds(seed, InconclusiveOdds::default())
    }

    pub fn with_odds(seed: Option<u64>, odds: InconclusiveOdds) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            odds,
        }
    }

    fn confirm(
        &self,
        baseline: FieldVerificationResult,
    ) -> Result<FieldVerificationResult, VerifierError> {
        if baseline.status != FieldStatus::Success {
            return Ok(baseline);
        }
        let Some(downgrade) = self.odds.for_field(baseline.field_id) else {
            return Ok(baseline);
        };

        let draw: f64 = self
            .rng
            .lock()
            .map_err(|_| VerifierError::Unavailable("simulation rng poisoned".to_string()))?
            .random();

        if draw >= downgrade.probability {
            return Ok(baseline);
        }

        let downgraded = FieldVerificationResult::new(
            baseline.field_id,
            FieldStatus::Warning,
            downgrade.score,
            downgrade.message,
        );
        Ok(match downgrade.details {
            Some(details) => downgraded.with_details(details),
            None => downgraded,
        })
    }
}

impl ExternalVerifier for SimulatedVerifier {
    fn verify(
        &self,
        _candidate: &CandidateData,
        baseline: FieldVerificationResult,
    ) -> impl Future<Output = Result<FieldVerificationResult, VerifierError>> + Send {
        ready(self.confirm(baseline))
    }
}
