use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    constants::properties::flashcard as prop,
    errors::{AppError, AppResult},
    models::domain::{quiz::display_topic, Flashcard, NewFlashcard},
    repositories::require_database,
    store::{properties::Properties, ContentStore, DatabaseQuery, Page, PropertyValue, SortDirection},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// Cards least recently reviewed first, optionally limited to one topic.
    async fn list(&self, topic: Option<String>) -> AppResult<Vec<Flashcard>>;
    async fn create(&self, card: NewFlashcard) -> AppResult<Flashcard>;
    async fn mark_reviewed(&self, id: &str) -> AppResult<Flashcard>;
}

pub struct StoreFlashcardRepository {
    store: Arc<dyn ContentStore>,
    database_id: Option<String>,
}

impl StoreFlashcardRepository {
    pub fn new(store: Arc<dyn ContentStore>, database_id: Option<String>) -> Self {
        Self { store, database_id }
    }
}

pub fn has_flashcard_shape(page: &Page) -> bool {
    page.has_property(prop::QUESTION) && page.has_property(prop::ANSWER)
}

pub fn flashcard_from_page(page: &Page) -> Flashcard {
    Flashcard {
        id: page.id.clone(),
        question: page.text(prop::QUESTION).unwrap_or_default(),
        answer: page.text(prop::ANSWER).unwrap_or_default(),
        topic: display_topic(page.select(prop::TOPIC)),
        last_reviewed: page.datetime(prop::LAST_REVIEWED),
    }
}

#[async_trait]
impl FlashcardRepository for StoreFlashcardRepository {
    async fn list(&self, topic: Option<String>) -> AppResult<Vec<Flashcard>> {
        let database_id = require_database(&self.database_id, "NOTION_DATABASE_ID_FLASHCARDS")?;

        let mut query = DatabaseQuery::new();
        if let Some(topic) = topic.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter_select(prop::TOPIC, topic);
        }
        let query = query.sort(prop::LAST_REVIEWED, SortDirection::Ascending);

        let pages = self.store.query(database_id, &query).await?;
        Ok(pages.iter().map(flashcard_from_page).collect())
    }

    async fn create(&self, card: NewFlashcard) -> AppResult<Flashcard> {
        let database_id = require_database(&self.database_id, "NOTION_DATABASE_ID_FLASHCARDS")?;

        let mut properties = Properties::new();
        properties.insert(prop::QUESTION.to_string(), PropertyValue::title(&card.question));
        properties.insert(prop::ANSWER.to_string(), PropertyValue::rich_text(&card.answer));
        properties.insert(prop::TOPIC.to_string(), PropertyValue::select(&card.topic));

        let page = self.store.create(database_id, properties).await?;
        Ok(Flashcard {
            id: page.id,
            question: card.question,
            answer: card.answer,
            topic: card.topic,
            last_reviewed: None,
        })
    }

    async fn mark_reviewed(&self, id: &str) -> AppResult<Flashcard> {
        require_database(&self.database_id, "NOTION_DATABASE_ID_FLASHCARDS")?;

        let current = self.store.retrieve(id).await?;
        if !has_flashcard_shape(&current) {
            log::warn!("Page {} does not have the flashcard properties", id);
            return Err(AppError::NotFound(format!("Flashcard '{}' not found", id)));
        }

        let mut properties = Properties::new();
        properties.insert(
            prop::LAST_REVIEWED.to_string(),
            PropertyValue::date(Utc::now().date_naive()),
        );

        let page = self.store.update(id, properties).await?;
        Ok(flashcard_from_page(&page))
    }
}
