use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::defaults::{DEFAULT_TOPIC, UNTITLED_QUIZ};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,                        // Assigned by the store on create
    pub title: String,                     // Set on create
    pub topic: String,                     // Falls back to the default topic
    pub number_of_questions: i16,          // Validated on create only
    pub questions_content: Option<String>, // Serialized question list, decoded lazily
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(id: &str, title: &str, topic: Option<&str>, number_of_questions: i16) -> Self {
        Quiz {
            id: id.to_string(),
            title: display_title(title),
            topic: display_topic(topic),
            number_of_questions,
            questions_content: None,
            created_at: Some(Utc::now()),
        }
    }
}

/// Values for a quiz record that has not been written yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewQuiz {
    pub title: String,
    pub topic: String,
    pub number_of_questions: i16,
}

pub fn display_title(title: &str) -> String {
    if title.trim().is_empty() {
        UNTITLED_QUIZ.to_string()
    } else {
        title.to_string()
    }
}

pub fn display_topic(topic: Option<&str>) -> String {
    topic
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TOPIC)
        .to_string()
}

/// Newest first; quizzes without a date go last.
pub fn sort_newest_first(quizzes: &mut [Quiz]) {
    quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
