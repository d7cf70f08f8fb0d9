use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::defaults::QUESTIONS_UNAVAILABLE_PROMPT;

/// One multiple-choice question as stored in a quiz's question list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
}

impl Question {
    /// Stand-in used when a quiz's question list cannot be read.
    pub fn placeholder() -> Self {
        Question {
            question: QUESTIONS_UNAVAILABLE_PROMPT.to_string(),
            options: Vec::new(),
            correct_answer: String::new(),
        }
    }

    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

#[derive(Debug, Error)]
pub enum QuestionDecodeError {
    #[error("quiz has no question content")]
    Missing,

    #[error("question list is empty")]
    Empty,

    #[error("malformed question list: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn decode_questions(raw: Option<&str>) -> Result<Vec<Question>, QuestionDecodeError> {
    let raw = raw
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or(QuestionDecodeError::Missing)?;

    let questions: Vec<Question> = serde_json::from_str(raw)?;
    if questions.is_empty() {
        return Err(QuestionDecodeError::Empty);
    }
    Ok(questions)
}

/// Never fails: anything unreadable becomes a single placeholder question and
/// the cause is logged.
pub fn decode_questions_or_placeholder(quiz_id: &str, raw: Option<&str>) -> Vec<Question> {
    match decode_questions(raw) {
        Ok(questions) => questions,
        Err(err) => {
            log::warn!("Quiz {}: {}; serving placeholder question", quiz_id, err);
            vec![Question::placeholder()]
        }
    }
}
