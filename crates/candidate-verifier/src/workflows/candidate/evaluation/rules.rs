use serde::{Deserialize, Serialize};

/// Domains that hand out throwaway inboxes.
pub const TEMPORARY_EMAIL_DOMAINS: [&str; 4] = [
    "10minutemail.com",
    "guerrillamail.com",
    "tempmail.org",
    "mailinator.com",
];

/// Caller-supplied scoring configuration. Missing sections fall back to the
/// built-in policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationRules {
    pub email: EmailRules,
    pub skills: SkillRules,
    pub experience: ExperienceRules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailRules {
    pub check_domain: bool,
    pub allowed_domains: Vec<String>,
    pub block_temp_email: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillRules {
    pub required_skills: Vec<String>,
    pub bonus_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceRules {
    pub minimum_years: u32,
}

impl Default for EmailRules {
    fn default() -> Self {
        Self {
            check_domain: true,
            allowed_domains: ["gmail.com", "yahoo.com", "outlook.com", "company.com"]
                .into_iter()
                .map(String::from)
                .collect(),
            block_temp_email: true,
        }
    }
}

impl Default for SkillRules {
    fn default() -> Self {
        Self {
            required_skills: ["JavaScript", "React", "Node.js"]
                .into_iter()
                .map(String::from)
                .collect(),
            bonus_skills: ["TypeScript", "Next.js", "AWS", "Docker"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for ExperienceRules {
    fn default() -> Self {
        Self { minimum_years: 2 }
    }
}

impl EmailRules {
    pub fn allows(&self, domain: &str) -> bool {
        self.allowed_domains
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(domain))
    }
}

pub fn is_temporary_domain(domain: &str) -> bool {
    TEMPORARY_EMAIL_DOMAINS
        .iter()
        .any(|temp| temp.eq_ignore_ascii_case(domain))
}
