use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned to saved applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applicant snapshot collected by the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(deserialize_with = "deserialize_years")]
    pub experience: u32,
    pub skills: String,
    pub education: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub address: String,
}

/// Years of experience arrive either as a JSON number or as the numeric text a
/// form field produces. Both are coerced to whole years here and nowhere else.
fn deserialize_years<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYears {
        Whole(u64),
        Signed(i64),
        Fractional(f64),
        Text(String),
    }

    let years = match RawYears::deserialize(deserializer)? {
        RawYears::Whole(value) => value,
        RawYears::Signed(value) => {
            return Err(serde::de::Error::custom(format!(
                "experience must not be negative (found {value})"
            )))
        }
        RawYears::Fractional(value) => {
            return Err(serde::de::Error::custom(format!(
                "experience must be a whole number of years (found {value})"
            )))
        }
        RawYears::Text(raw) => raw.trim().parse::<u64>().map_err(|_| {
            serde::de::Error::custom(format!(
                "experience must be a whole number of years (found '{raw}')"
            ))
        })?,
    };

    u32::try_from(years)
        .map_err(|_| serde::de::Error::custom(format!("experience out of range ({years})")))
}

/// The six fields checked during a verification run plus the optional
/// profile fields the scorer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    FullName,
    Email,
    Phone,
    Experience,
    Skills,
    Education,
    Address,
    LinkedinUrl,
}

impl FieldId {
    /// Presentation order of a verification run.
    pub const VERIFICATION_ORDER: [FieldId; 6] = [
        FieldId::Email,
        FieldId::Phone,
        FieldId::Experience,
        FieldId::Skills,
        FieldId::Education,
        FieldId::Address,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            FieldId::FullName => "fullName",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Experience => "experience",
            FieldId::Skills => "skills",
            FieldId::Education => "education",
            FieldId::Address => "address",
            FieldId::LinkedinUrl => "linkedinUrl",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FieldId::FullName => "Full Name",
            FieldId::Email => "Email Address",
            FieldId::Phone => "Phone Number",
            FieldId::Experience => "Work Experience",
            FieldId::Skills => "Skills",
            FieldId::Education => "Education",
            FieldId::Address => "Address",
            FieldId::LinkedinUrl => "LinkedIn Profile",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Status tier of a single field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Success,
    Warning,
    Error,
    Loading,
}

impl FieldStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FieldStatus::Success => "success",
            FieldStatus::Warning => "warning",
            FieldStatus::Error => "error",
            FieldStatus::Loading => "loading",
        }
    }
}

/// Outcome of checking one field. Built once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldVerificationResult {
    pub field_id: FieldId,
    pub field_name: String,
    pub status: FieldStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub score: u8,
}

impl FieldVerificationResult {
    pub fn new(field: FieldId, status: FieldStatus, score: u8, message: impl Into<String>) -> Self {
        Self {
            field_id: field,
            field_name: field.label().to_string(),
            status,
            message: message.into(),
            details: None,
            score: score.min(100),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Tri-state outcome of a whole verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Passed,
    Warning,
    Failed,
}

impl OverallStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OverallStatus::Passed => "passed",
            OverallStatus::Warning => "warning",
            OverallStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate of every field result for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub field_results: Vec<FieldVerificationResult>,
    pub overall_score: u8,
    pub status: OverallStatus,
    pub summary: String,
}

/// Free-form answers to the follow-up questionnaire keyed by question id.
pub type AdditionalAnswers = BTreeMap<String, String>;

/// Stored application. Created on save and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedApplication {
    pub id: ApplicationId,
    pub candidate_data: CandidateData,
    pub verification_result: VerificationResult,
    pub additional_answers: AdditionalAnswers,
    pub timestamp: DateTime<Utc>,
    pub status: OverallStatus,
}
