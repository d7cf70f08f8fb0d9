use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Question, Quiz, QuizAttempt, QuizResultReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A dismissible message for the user, attached to responses that degraded
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// A list that is always renderable: on failure `items` is empty and
/// `notice` explains why.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T: Serialize> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl<T: Serialize> Listing<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Listing {
            items,
            notice: None,
        }
    }

    pub fn degraded(notice: Notice) -> Self {
        Listing {
            items: Vec::new(),
            notice: Some(notice),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub number_of_questions: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Quiz> for QuizSummary {
    fn from(quiz: Quiz) -> Self {
        QuizSummary {
            id: quiz.id,
            title: quiz.title,
            topic: quiz.topic,
            number_of_questions: quiz.number_of_questions,
            created_at: quiz.created_at,
        }
    }
}

/// A quiz with its decoded questions, correct answers included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizDetail {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub number_of_questions: i16,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// What the user sees while answering. Carries no correct answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptView {
    pub attempt_id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub question_number: usize,
    pub total: usize,
    pub question: String,
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub is_last: bool,
    pub can_go_back: bool,
}

impl AttemptView {
    /// `None` once the attempt has finished.
    pub fn from_attempt(
        attempt_id: &str,
        quiz_id: &str,
        quiz_title: &str,
        attempt: &QuizAttempt,
    ) -> Option<Self> {
        let index = attempt.current_index()?;
        let question = attempt.questions().get(index)?;
        let selected = attempt
            .current_answer()
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        Some(AttemptView {
            attempt_id: attempt_id.to_string(),
            quiz_id: quiz_id.to_string(),
            quiz_title: quiz_title.to_string(),
            question_number: index + 1,
            total: attempt.total(),
            question: question.question.clone(),
            options: question.options.clone(),
            selected,
            is_last: index + 1 == attempt.total(),
            can_go_back: index > 0,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptResponse {
    Presenting(AttemptView),
    Finished(QuizResultReport),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSender {
    Learner,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// The learner's message echoed back with the assistant's reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatExchange {
    pub message: ChatMessage,
    pub reply: ChatMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub quizzes: usize,
    pub flashcards: usize,
    pub summaries: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}
