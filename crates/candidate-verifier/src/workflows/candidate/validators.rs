//! Pure field predicates shared by intake validation and scoring.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::evaluation::VerificationRules;

pub const MIN_EXPERIENCE_YEARS: u32 = 0;
pub const MAX_EXPERIENCE_YEARS: u32 = 50;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern compiles"));
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern compiles"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Spaces, dashes and parentheses are formatting and are stripped before the
/// digit check.
pub fn is_valid_phone(phone: &str) -> bool {
    let cleaned: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    PHONE_PATTERN.is_match(&cleaned)
}

pub fn is_valid_url(raw: &str) -> bool {
    Url::parse(raw).is_ok()
}

pub fn is_valid_linkedin(raw: &str) -> bool {
    is_valid_url(raw) && raw.contains("linkedin.com")
}

pub fn is_valid_name(name: &str) -> bool {
    name.chars().count() >= 2 && NAME_PATTERN.is_match(name)
}

pub fn is_valid_experience(years: u32) -> bool {
    (MIN_EXPERIENCE_YEARS..=MAX_EXPERIENCE_YEARS).contains(&years)
}

/// Lower-cased domain part of an address, if any.
pub fn email_domain(email: &str) -> Option<String> {
    email
        .split('@')
        .nth(1)
        .filter(|domain| !domain.is_empty())
        .map(str::to_lowercase)
}

/// Candidate skill tokens: comma separated, trimmed, lower-cased, blanks dropped.
pub fn skill_tokens(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Which configured skills the candidate covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkillMatch {
    pub required_total: usize,
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub bonus_total: usize,
    pub matched_bonus: Vec<String>,
}

impl SkillMatch {
    pub fn has_all_required(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// A configured skill matches when any candidate token contains it.
pub fn match_skills(skills: &str, rules: &VerificationRules) -> SkillMatch {
    let tokens = skill_tokens(skills);
    let covered = |skill: &str| tokens.iter().any(|token| token.contains(skill));

    let required = normalized(&rules.skills.required_skills);
    let bonus = normalized(&rules.skills.bonus_skills);

    let (matched_required, missing_required): (Vec<String>, Vec<String>) =
        required.iter().cloned().partition(|skill| covered(skill));
    let matched_bonus = bonus.iter().filter(|skill| covered(skill)).cloned().collect();

    SkillMatch {
        required_total: required.len(),
        matched_required,
        missing_required,
        bonus_total: bonus.len(),
        matched_bonus,
    }
}

fn normalized(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}
