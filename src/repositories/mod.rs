pub mod flashcard_repository;
pub mod quiz_repository;
pub mod upload_repository;

pub use flashcard_repository::{FlashcardRepository, StoreFlashcardRepository};
pub use quiz_repository::{QuizRepository, StoreQuizRepository};
pub use upload_repository::{StoreUploadRepository, UploadRepository};

#[cfg(test)]
pub use flashcard_repository::MockFlashcardRepository;
#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
#[cfg(test)]
pub use upload_repository::MockUploadRepository;

use crate::errors::{AppError, AppResult};

/// Resolves a configured database id, or reports which setting is missing.
pub(crate) fn require_database<'a>(
    database_id: &'a Option<String>,
    setting: &str,
) -> AppResult<&'a str> {
    database_id
        .as_deref()
        .ok_or_else(|| AppError::NotConfigured(format!("{} is not set", setting)))
}
