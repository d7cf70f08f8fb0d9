use chrono::NaiveDate;

use crate::store::{Page, Properties, PropertyValue};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::constants::properties::{flashcard, quiz, upload};

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("fixture date")
    }

    /// A quiz page as the store returns it. `None` content leaves the
    /// question column present but empty.
    pub fn quiz_page(id: &str, title: &str, questions: Option<&str>, created: &str) -> Page {
        let mut properties = Properties::new();
        properties.insert(quiz::TITLE.to_string(), PropertyValue::title(title));
        properties.insert(quiz::TOPIC.to_string(), PropertyValue::select("History"));
        properties.insert(quiz::NUMBER_OF_QUESTIONS.to_string(), PropertyValue::number(3.0));
        properties.insert(
            quiz::QUESTIONS_CONTENT.to_string(),
            PropertyValue::rich_text(questions.unwrap_or_default()),
        );
        properties.insert(quiz::CREATED_AT.to_string(), PropertyValue::date(day(created)));

        Page {
            id: id.to_string(),
            created_time: None,
            properties,
        }
    }

    pub fn flashcard_page(id: &str, question: &str, answer: &str, topic: &str) -> Page {
        let mut properties = Properties::new();
        properties.insert(flashcard::QUESTION.to_string(), PropertyValue::title(question));
        properties.insert(flashcard::ANSWER.to_string(), PropertyValue::rich_text(answer));
        properties.insert(flashcard::TOPIC.to_string(), PropertyValue::select(topic));

        Page {
            id: id.to_string(),
            created_time: None,
            properties,
        }
    }

    pub fn upload_page(id: &str, name: &str, status: &str, summary: Option<&str>) -> Page {
        let mut properties = Properties::new();
        properties.insert(upload::NAME.to_string(), PropertyValue::title(name));
        properties.insert(upload::STATUS.to_string(), PropertyValue::select(status));
        if let Some(summary) = summary {
            properties.insert(upload::SUMMARY.to_string(), PropertyValue::rich_text(summary));
        }

        Page {
            id: id.to_string(),
            created_time: None,
            properties,
        }
    }

    /// The three-question quiz used across attempt tests: correct answers A, X, C.
    pub const THREE_QUESTIONS: &str = r#"[
        {"question": "Q1", "options": ["A", "B"], "correctAnswer": "A"},
        {"question": "Q2", "options": ["B", "X"], "correctAnswer": "X"},
        {"question": "Q3", "options": ["C", "D"], "correctAnswer": "C"}
    ]"#;
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::constants::properties::quiz;

    #[test]
    fn test_quiz_page_fixture_has_quiz_shape() {
        let page = quiz_page("q-1", "Basics", Some(THREE_QUESTIONS), "2024-01-01");

        assert!(page.has_property(quiz::TITLE));
        assert!(page.has_property(quiz::QUESTIONS_CONTENT));
        assert_eq!(page.text(quiz::TITLE).as_deref(), Some("Basics"));
    }

    #[test]
    fn test_empty_question_content_is_present_but_blank() {
        let page = quiz_page("q-1", "Basics", None, "2024-01-01");
        assert_eq!(page.text(quiz::QUESTIONS_CONTENT).as_deref(), Some(""));
    }
}
