use std::collections::BTreeMap;
use std::fmt;

use super::domain::{CandidateData, FieldId};
use super::validators::{
    is_valid_email, is_valid_experience, is_valid_linkedin, is_valid_name, is_valid_phone,
    MAX_EXPERIENCE_YEARS, MIN_EXPERIENCE_YEARS,
};

const MIN_ADDRESS_CHARS: usize = 2;
const MIN_SKILLS_CHARS: usize = 3;

/// Per-field messages that block a submission, keyed by field id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntakeRejection {
    pub errors: BTreeMap<FieldId, String>,
}

impl IntakeRejection {
    fn reject(&mut self, field: FieldId, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn message_for(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

impl fmt::Display for IntakeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "candidate data rejected ({})", parts.join("; "))
    }
}

impl std::error::Error for IntakeRejection {}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate an intake form before a verification run is allowed to start.
pub fn validate_candidate(candidate: &CandidateData) -> Result<(), IntakeRejection> {
    let mut rejection = IntakeRejection::default();

    if is_blank(&candidate.full_name) {
        rejection.reject(FieldId::FullName, "Full Name is required");
    } else if !is_valid_name(candidate.full_name.trim()) {
        rejection.reject(
            FieldId::FullName,
            "Full name must be at least 2 characters and contain only letters",
        );
    }

    if is_blank(&candidate.email) {
        rejection.reject(FieldId::Email, "Email Address is required");
    } else if !is_valid_email(candidate.email.trim()) {
        rejection.reject(FieldId::Email, "Please enter a valid email address");
    }

    if is_blank(&candidate.phone) {
        rejection.reject(FieldId::Phone, "Phone Number is required");
    } else if !is_valid_phone(&candidate.phone) {
        rejection.reject(FieldId::Phone, "Please enter a valid phone number");
    }

    if is_blank(&candidate.address) {
        rejection.reject(FieldId::Address, "Address is required");
    } else if candidate.address.trim().chars().count() < MIN_ADDRESS_CHARS {
        rejection.reject(FieldId::Address, "Address must be at least 2 characters");
    }

    if !is_valid_experience(candidate.experience) {
        rejection.reject(
            FieldId::Experience,
            format!(
                "Experience must be between {MIN_EXPERIENCE_YEARS} and {MAX_EXPERIENCE_YEARS} years"
            ),
        );
    }

    if candidate.skills.trim().chars().count() < MIN_SKILLS_CHARS {
        rejection.reject(
            FieldId::Skills,
            "Please enter at least 3 characters for skills",
        );
    }

    if is_blank(&candidate.education) {
        rejection.reject(FieldId::Education, "Please select your education level");
    }

    if let Some(url) = candidate.linkedin_url.as_deref().filter(|url| !is_blank(url)) {
        if !is_valid_linkedin(url.trim()) {
            rejection.reject(FieldId::LinkedinUrl, "Please enter a valid LinkedIn URL");
        }
    }

    if rejection.errors.is_empty() {
        Ok(())
    } else {
        Err(rejection)
    }
}
