use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::AdditionalAnswers;

/// A follow-up question asked after verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
}

pub const QUESTIONS: [Question; 6] = [
    Question {
        id: "availability",
        label: "When can you start?",
        placeholder: "e.g., Immediately, 2 weeks notice, etc.",
        required: true,
    },
    Question {
        id: "salaryExpectation",
        label: "Salary Expectation",
        placeholder: "e.g., $60,000 - $70,000 per year",
        required: true,
    },
    Question {
        id: "workLocation",
        label: "Preferred Work Location",
        placeholder: "e.g., Remote, On-site, Hybrid",
        required: true,
    },
    Question {
        id: "workSchedule",
        label: "Preferred Work Schedule",
        placeholder: "e.g., Full-time, Part-time, Flexible hours",
        required: true,
    },
    Question {
        id: "motivation",
        label: "Why are you interested in this position?",
        placeholder: "Brief explanation of your interest and motivation",
        required: true,
    },
    Question {
        id: "additionalInfo",
        label: "Additional Information (Optional)",
        placeholder: "Any other relevant information you would like to share",
        required: false,
    },
];

pub const REQUIRED_ANSWER_MESSAGE: &str = "This field is required";

/// Missing required answers keyed by question id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("questionnaire incomplete: {} required question(s) unanswered", .missing.len())]
pub struct IncompleteAnswers {
    pub missing: BTreeMap<&'static str, &'static str>,
}

impl IncompleteAnswers {
    /// Index of the first unanswered question, so a client can jump to it.
    pub fn first_unanswered(&self) -> Option<usize> {
        QUESTIONS
            .iter()
            .position(|question| self.missing.contains_key(question.id))
    }
}

pub fn validate_answers(answers: &AdditionalAnswers) -> Result<(), IncompleteAnswers> {
    let missing: BTreeMap<&'static str, &'static str> = QUESTIONS
        .iter()
        .filter(|question| question.required)
        .filter(|question| {
            answers
                .get(question.id)
                .map(|answer| answer.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|question| (question.id, REQUIRED_ANSWER_MESSAGE))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IncompleteAnswers { missing })
    }
}
