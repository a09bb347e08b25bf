use serde::{Deserialize, Serialize};

use super::super::domain::{
    FieldStatus, FieldVerificationResult, OverallStatus, VerificationResult,
};

/// Rule used to turn the overall score and per-tier counts into a status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdPolicy {
    /// More than two errors or a score under 50 fails; more than one warning
    /// or a score under 80 warns.
    #[default]
    CountAware,
    /// Score bands only: 80 passes, 60 warns.
    Simple,
}

impl ThresholdPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "count_aware" | "strict" => Some(Self::CountAware),
            "simple" => Some(Self::Simple),
            _ => None,
        }
    }

    pub fn decide(self, overall_score: u8, counts: &TierCounts) -> OverallStatus {
        match self {
            ThresholdPolicy::CountAware => {
                if counts.error > 2 || overall_score < 50 {
                    OverallStatus::Failed
                } else if counts.warning > 1 || overall_score < 80 {
                    OverallStatus::Warning
                } else {
                    OverallStatus::Passed
                }
            }
            ThresholdPolicy::Simple => {
                if overall_score >= 80 {
                    OverallStatus::Passed
                } else if overall_score >= 60 {
                    OverallStatus::Warning
                } else {
                    OverallStatus::Failed
                }
            }
        }
    }
}

/// Number of field results per status tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub success: usize,
    pub warning: usize,
    pub error: usize,
    pub total: usize,
}

impl TierCounts {
    pub fn tally(results: &[FieldVerificationResult]) -> Self {
        results.iter().fold(
            TierCounts {
                total: results.len(),
                ..TierCounts::default()
            },
            |mut counts, result| {
                match result.status {
                    FieldStatus::Success => counts.success += 1,
                    FieldStatus::Warning => counts.warning += 1,
                    FieldStatus::Error => counts.error += 1,
                    FieldStatus::Loading => {}
                }
                counts
            },
        )
    }
}

/// Rounded arithmetic mean of the field scores; 0 for an empty run.
pub fn overall_score(results: &[FieldVerificationResult]) -> u8 {
    if results.is_empty() {
        return 0;
    }
    let total: u32 = results.iter().map(|result| u32::from(result.score)).sum();
    (f64::from(total) / results.len() as f64).round() as u8
}

pub fn summarize(status: OverallStatus, counts: &TierCounts) -> String {
    match status {
        OverallStatus::Passed => format!(
            "Verification completed successfully. {} out of {} fields verified with high confidence.",
            counts.success, counts.total
        ),
        OverallStatus::Warning => format!(
            "Verification completed with some concerns. {} field(s) require manual review before final approval.",
            counts.warning
        ),
        OverallStatus::Failed => format!(
            "Verification failed. {} field(s) could not be verified. Manual investigation required.",
            counts.error
        ),
    }
}

/// Combine field results into the overall result under `policy`.
pub fn aggregate(
    field_results: Vec<FieldVerificationResult>,
    policy: ThresholdPolicy,
) -> VerificationResult {
    let overall_score = overall_score(&field_results);
    let counts = TierCounts::tally(&field_results);
    let status = policy.decide(overall_score, &counts);
    let summary = summarize(status, &counts);

    VerificationResult {
        field_results,
        overall_score,
        status,
        summary,
    }
}
