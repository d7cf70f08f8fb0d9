use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Flashcard {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewFlashcard {
    pub question: String,
    pub answer: String,
    pub topic: String,
}
