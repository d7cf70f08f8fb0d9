use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Flashcard,
        dto::{request::CreateFlashcardRequest, response::Listing},
    },
    repositories::FlashcardRepository,
    services::degraded_notice,
};

pub struct FlashcardService {
    repository: Arc<dyn FlashcardRepository>,
}

impl FlashcardService {
    pub fn new(repository: Arc<dyn FlashcardRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_flashcards(&self, topic: Option<&str>) -> Listing<Flashcard> {
        match self.repository.list(topic.map(str::to_string)).await {
            Ok(cards) => Listing::ok(cards),
            Err(err) => Listing::degraded(degraded_notice("Flashcards", &err)),
        }
    }

    pub async fn create_flashcard(&self, request: CreateFlashcardRequest) -> AppResult<Flashcard> {
        request.validate()?;
        self.repository.create(request.into_new_flashcard()).await
    }

    pub async fn mark_reviewed(&self, id: &str) -> AppResult<Flashcard> {
        if id.trim().is_empty() {
            return Err(AppError::NotFound("Flashcard not found".to_string()));
        }
        self.repository.mark_reviewed(id.trim()).await
    }
}
