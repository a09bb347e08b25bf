mod fields;
mod policy;
mod rules;

pub use fields::{education_tier_score, DEFAULT_EDUCATION_SCORE, EDUCATION_TIERS};
pub use policy::{aggregate, overall_score, summarize, ThresholdPolicy, TierCounts};
pub use rules::{
    is_temporary_domain, EmailRules, ExperienceRules, SkillRules, VerificationRules,
    TEMPORARY_EMAIL_DOMAINS,
};

use super::domain::{CandidateData, FieldId, FieldVerificationResult};

/// Stateless scorer that applies a rule set to candidate fields.
#[derive(Debug, Clone, Default)]
pub struct FieldScorer {
    rules: VerificationRules,
}

impl FieldScorer {
    pub fn new(rules: VerificationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &VerificationRules {
        &self.rules
    }

    /// Deterministic score and status tier for one field.
    pub fn score(&self, field: FieldId, candidate: &CandidateData) -> FieldVerificationResult {
        fields::score_field(field, candidate, &self.rules)
    }

    /// Score every field in verification order.
    pub fn score_all(&self, candidate: &CandidateData) -> Vec<FieldVerificationResult> {
        FieldId::VERIFICATION_ORDER
            .iter()
            .map(|field| self.score(*field, candidate))
            .collect()
    }
}
