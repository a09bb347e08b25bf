use super::super::domain::{CandidateData, FieldId, FieldStatus, FieldVerificationResult};
use super::super::validators::{
    email_domain, is_valid_email, is_valid_experience, is_valid_linkedin, is_valid_name,
    is_valid_phone, match_skills, MAX_EXPERIENCE_YEARS, MIN_EXPERIENCE_YEARS,
};
use super::rules::{is_temporary_domain, VerificationRules};

const REQUIRED_SKILL_WEIGHT: f64 = 80.0;
const BONUS_SKILL_WEIGHT: f64 = 20.0;
const MIN_ADDRESS_CHARS: usize = 10;
const UNLISTED_DOMAIN_SCORE: u8 = 60;
pub const DEFAULT_EDUCATION_SCORE: u8 = 60;

/// Education tiers recognised by exact, case-sensitive label. Anything else,
/// blank included, scores [`DEFAULT_EDUCATION_SCORE`].
pub const EDUCATION_TIERS: [(&str, u8); 5] = [
    ("High School", 60),
    ("Bootcamp/Certification", 70),
    ("Bachelor's Degree", 80),
    ("Master's Degree", 90),
    ("PhD", 100),
];

pub(crate) fn score_field(
    field: FieldId,
    candidate: &CandidateData,
    rules: &VerificationRules,
) -> FieldVerificationResult {
    match field {
        FieldId::FullName => score_name(&candidate.full_name),
        FieldId::Email => score_email(&candidate.email, rules),
        FieldId::Phone => score_phone(&candidate.phone),
        FieldId::Experience => score_experience(candidate.experience, rules),
        FieldId::Skills => score_skills(&candidate.skills, rules),
        FieldId::Education => score_education(&candidate.education),
        FieldId::Address => score_address(&candidate.address),
        FieldId::LinkedinUrl => score_linkedin(candidate.linkedin_url.as_deref()),
    }
}

pub(crate) fn score_email(email: &str, rules: &VerificationRules) -> FieldVerificationResult {
    if !is_valid_email(email) {
        return FieldVerificationResult::new(
            FieldId::Email,
            FieldStatus::Error,
            0,
            "Invalid email format",
        );
    }

    let domain = email_domain(email).unwrap_or_default();

    if rules.email.block_temp_email && is_temporary_domain(&domain) {
        return FieldVerificationResult::new(
            FieldId::Email,
            FieldStatus::Warning,
            UNLISTED_DOMAIN_SCORE,
            "Temporary email domain detected",
        )
        .with_details(format!(
            "Domain {domain} issues throwaway inboxes; request a permanent address"
        ));
    }

    if rules.email.check_domain && !rules.email.allows(&domain) {
        return FieldVerificationResult::new(
            FieldId::Email,
            FieldStatus::Warning,
            UNLISTED_DOMAIN_SCORE,
            "Email domain is not on the allowed list",
        )
        .with_details(format!("Domain {domain} requires manual confirmation"));
    }

    FieldVerificationResult::new(
        FieldId::Email,
        FieldStatus::Success,
        100,
        "Email verified successfully",
    )
}

pub(crate) fn score_phone(phone: &str) -> FieldVerificationResult {
    if is_valid_phone(phone) {
        FieldVerificationResult::new(
            FieldId::Phone,
            FieldStatus::Success,
            100,
            "Phone number verified",
        )
    } else {
        FieldVerificationResult::new(
            FieldId::Phone,
            FieldStatus::Error,
            0,
            "Invalid phone number format",
        )
    }
}

pub(crate) fn score_name(name: &str) -> FieldVerificationResult {
    if is_valid_name(name) {
        FieldVerificationResult::new(FieldId::FullName, FieldStatus::Success, 100, "Name verified")
    } else {
        FieldVerificationResult::new(
            FieldId::FullName,
            FieldStatus::Error,
            0,
            "Full name must be at least 2 characters and contain only letters",
        )
    }
}

pub(crate) fn score_experience(years: u32, rules: &VerificationRules) -> FieldVerificationResult {
    if !is_valid_experience(years) {
        return FieldVerificationResult::new(
            FieldId::Experience,
            FieldStatus::Error,
            0,
            format!(
                "Experience must be between {MIN_EXPERIENCE_YEARS} and {MAX_EXPERIENCE_YEARS} years"
            ),
        );
    }

    let minimum = rules.experience.minimum_years;
    if years < minimum {
        return FieldVerificationResult::new(
            FieldId::Experience,
            FieldStatus::Warning,
            50,
            format!("Experience below minimum requirement ({minimum} years)"),
        );
    }

    let score = 70u32.saturating_add(years.saturating_mul(2)).min(100) as u8;
    FieldVerificationResult::new(
        FieldId::Experience,
        FieldStatus::Success,
        score,
        "Experience meets requirements",
    )
    .with_details(format!("{years} year(s) reported"))
}

pub(crate) fn score_skills(skills: &str, rules: &VerificationRules) -> FieldVerificationResult {
    if skills.trim().is_empty() {
        return FieldVerificationResult::new(
            FieldId::Skills,
            FieldStatus::Error,
            0,
            "Skills information is required",
        );
    }

    let matched = match_skills(skills, rules);
    let required = coverage(matched.matched_required.len(), matched.required_total);
    let bonus = coverage(matched.matched_bonus.len(), matched.bonus_total);
    let score = (required * REQUIRED_SKILL_WEIGHT + bonus * BONUS_SKILL_WEIGHT)
        .round()
        .clamp(0.0, 100.0) as u8;

    let (status, message) = if score >= 80 {
        (FieldStatus::Success, "Skills profile matches requirements")
    } else if score >= 50 {
        (FieldStatus::Warning, "Partial skills match")
    } else {
        (FieldStatus::Error, "Skills do not meet minimum requirements")
    };

    FieldVerificationResult::new(FieldId::Skills, status, score, message).with_details(format!(
        "Matched {}/{} required skills",
        matched.matched_required.len(),
        matched.required_total
    ))
}

/// An empty rule list is fully covered.
fn coverage(matched: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        matched as f64 / total as f64
    }
}

pub fn education_tier_score(label: &str) -> Option<u8> {
    EDUCATION_TIERS
        .iter()
        .find(|(tier, _)| *tier == label)
        .map(|(_, score)| *score)
}

pub(crate) fn score_education(education: &str) -> FieldVerificationResult {
    match education_tier_score(education) {
        Some(score) if score >= 80 => FieldVerificationResult::new(
            FieldId::Education,
            FieldStatus::Success,
            score,
            "Education credentials verified",
        ),
        Some(score) => FieldVerificationResult::new(
            FieldId::Education,
            FieldStatus::Warning,
            score,
            "Education level below preferred tier",
        ),
        None => FieldVerificationResult::new(
            FieldId::Education,
            FieldStatus::Warning,
            DEFAULT_EDUCATION_SCORE,
            "Education level not recognized",
        )
        .with_details("Scored with the default education tier"),
    }
}

pub(crate) fn score_address(address: &str) -> FieldVerificationResult {
    if address.trim().chars().count() < MIN_ADDRESS_CHARS {
        return FieldVerificationResult::new(
            FieldId::Address,
            FieldStatus::Error,
            0,
            "Complete address is required",
        );
    }

    FieldVerificationResult::new(
        FieldId::Address,
        FieldStatus::Success,
        100,
        "Address verified successfully",
    )
}

pub(crate) fn score_linkedin(url: Option<&str>) -> FieldVerificationResult {
    match url.map(str::trim).filter(|url| !url.is_empty()) {
        None => FieldVerificationResult::new(
            FieldId::LinkedinUrl,
            FieldStatus::Success,
            80,
            "No LinkedIn profile provided",
        ),
        Some(url) if is_valid_linkedin(url) => FieldVerificationResult::new(
            FieldId::LinkedinUrl,
            FieldStatus::Success,
            100,
            "LinkedIn profile URL is valid",
        ),
        Some(_) => FieldVerificationResult::new(
            FieldId::LinkedinUrl,
            FieldStatus::Error,
            0,
            "Invalid LinkedIn URL",
        ),
    }
}
