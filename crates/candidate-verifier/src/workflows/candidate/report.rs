use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AdditionalAnswers, CandidateData, VerificationResult};

/// Downloadable snapshot of a finished verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub candidate: CandidateData,
    pub verification: VerificationResult,
    pub additional_answers: AdditionalAnswers,
    pub generated_at: DateTime<Utc>,
}

impl VerificationReport {
    pub fn new(
        candidate: CandidateData,
        verification: VerificationResult,
        additional_answers: AdditionalAnswers,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            candidate,
            verification,
            additional_answers,
            generated_at,
        }
    }

    /// `verification_report_<Full_Name>_<YYYY-MM-DD>.json`
    pub fn file_name(&self) -> String {
        let name = self
            .candidate
            .full_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        format!(
            "verification_report_{}_{}.json",
            name,
            self.generated_at.format("%Y-%m-%d")
        )
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
