use serde::Deserialize;
use validator::Validate;

use crate::constants::defaults::DEFAULT_NUMBER_OF_QUESTIONS;
use crate::models::domain::{
    quiz::display_topic, NewFlashcard, NewQuiz, NewUpload,
};

fn default_number_of_questions() -> i16 {
    DEFAULT_NUMBER_OF_QUESTIONS
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 2, max = 2000, message = "Title must be between 2 and 2000 characters"))]
    pub title: String,

    #[validate(length(max = 100))]
    pub topic: Option<String>,

    #[serde(default = "default_number_of_questions", alias = "numberOfQuestions")]
    #[validate(range(min = 1, max = 50, message = "Number of questions must be between 1 and 50"))]
    pub number_of_questions: i16,
}

impl CreateQuizRequest {
    pub fn into_new_quiz(self) -> NewQuiz {
        NewQuiz {
            topic: display_topic(self.topic.as_deref()),
            title: self.title,
            number_of_questions: self.number_of_questions,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFlashcardRequest {
    #[validate(length(min = 2, max = 2000, message = "Question must be at least 2 characters"))]
    pub question: String,

    #[validate(length(min = 2, max = 2000, message = "Answer must be at least 2 characters"))]
    pub answer: String,

    #[validate(length(max = 100))]
    pub topic: Option<String>,
}

impl CreateFlashcardRequest {
    pub fn into_new_flashcard(self) -> NewFlashcard {
        NewFlashcard {
            topic: display_topic(self.topic.as_deref()),
            question: self.question,
            answer: self.answer,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUploadRequest {
    #[validate(length(min = 1, max = 2000))]
    pub name: String,

    #[serde(default, alias = "fileUrl")]
    #[validate(url)]
    pub file_url: Option<String>,
}

impl RegisterUploadRequest {
    pub fn into_new_upload(self) -> NewUpload {
        NewUpload {
            name: self.name,
            file_url: self.file_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswerRequest {
    #[validate(length(min = 1))]
    pub option: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be between 1 and 2000 characters"))]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashcardQuery {
    pub topic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_valid_create_quiz_request() {
        let request = CreateQuizRequest {
            title: "History of Andalusia".to_string(),
            topic: None,
            number_of_questions: 10,
        };
        assert!(request.validate().is_ok());

        let new_quiz = request.into_new_quiz();
        assert_eq!(new_quiz.topic, "General");
    }

    #[test]
    fn test_title_too_short() {
        for title in ["", "a"] {
            let request = CreateQuizRequest {
                title: title.to_string(),
                topic: None,
                number_of_questions: 10,
            };
            assert!(request.validate().is_err());
        }
    }

    #[test]
    fn test_long_titles_fit_one_title_segment() {
        for (length, ok) in [(201, true), (2000, true), (2001, false)] {
            let request = CreateQuizRequest {
                title: "t".repeat(length),
                topic: None,
                number_of_questions: 10,
            };
            assert_eq!(request.validate().is_ok(), ok, "length {}", length);
        }
    }

    #[test]
    fn test_number_of_questions_bounds() {
        for (count, ok) in [(0, false), (1, true), (50, true), (51, false)] {
            let request = CreateQuizRequest {
                title: "Valid".to_string(),
                topic: Some("Math".to_string()),
                number_of_questions: count,
            };
            assert_eq!(request.validate().is_ok(), ok, "count {}", count);
        }
    }

    #[test]
    fn test_number_of_questions_defaults_and_accepts_camel_case() {
        let request: CreateQuizRequest =
            serde_json::from_str(r#"{"title": "Basics"}"#).expect("should parse");
        assert_eq!(request.number_of_questions, 10);

        let request: CreateQuizRequest =
            serde_json::from_str(r#"{"title": "Basics", "numberOfQuestions": 4}"#)
                .expect("should parse");
        assert_eq!(request.number_of_questions, 4);
    }

    #[test]
    fn test_flashcard_request_validation() {
        let request = CreateFlashcardRequest {
            question: "Q".to_string(),
            answer: "Answer".to_string(),
            topic: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_upload_request_requires_valid_url() {
        let request = RegisterUploadRequest {
            name: "Notes".to_string(),
            file_url: Some("not a url".to_string()),
        };
        assert!(request.validate().is_err());

        let request = RegisterUploadRequest {
            name: "Notes".to_string(),
            file_url: None,
        };
        assert!(request.validate().is_ok());
    }
}
