pub mod chat_service;
pub mod dashboard_service;
pub mod flashcard_service;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod summary_service;

use crate::{errors::AppError, models::dto::response::Notice};

/// Turns a failed list fetch into the notice shown in place of the list.
pub(crate) fn degraded_notice(what: &str, err: &AppError) -> Notice {
    match err {
        AppError::NotConfigured(detail) => {
            log::warn!("{} unavailable, store not configured: {}", what, detail);
            Notice::warning(format!("{} are unavailable: {}", what, detail))
        }
        other => {
            log::error!("Failed to load {}: {}", what.to_lowercase(), other);
            Notice::warning(format!("Could not load {} right now", what.to_lowercase()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dto::response::NoticeLevel;

    #[test]
    fn configuration_notice_names_the_missing_setting() {
        let notice = degraded_notice(
            "Quizzes",
            &AppError::NotConfigured("NOTION_DATABASE_ID_QUIZZES is not set".to_string()),
        );

        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("NOTION_DATABASE_ID_QUIZZES"));
    }

    #[test]
    fn store_notice_hides_the_cause() {
        let notice = degraded_notice("Flashcards", &AppError::StoreError("rate_limited".to_string()));
        assert_eq!(notice.message, "Could not load flashcards right now");
    }
}
