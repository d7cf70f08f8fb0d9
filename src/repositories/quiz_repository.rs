use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    constants::properties::quiz as prop,
    errors::{AppError, AppResult},
    models::domain::{quiz::sort_newest_first, NewQuiz, Quiz, ScoreResult},
    repositories::require_database,
    store::{properties::Properties, ContentStore, DatabaseQuery, Page, PropertyValue, SortDirection},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn create(&self, quiz: NewQuiz) -> AppResult<Quiz>;
    async fn record_score(&self, id: &str, result: ScoreResult) -> AppResult<()>;
}

pub struct StoreQuizRepository {
    store: Arc<dyn ContentStore>,
    database_id: Option<String>,
}

impl StoreQuizRepository {
    pub fn new(store: Arc<dyn ContentStore>, database_id: Option<String>) -> Self {
        Self { store, database_id }
    }
}

/// Detail lookups only accept pages carrying both the title and question columns.
pub fn has_quiz_shape(page: &Page) -> bool {
    page.has_property(prop::TITLE) && page.has_property(prop::QUESTIONS_CONTENT)
}

pub fn quiz_from_page(page: &Page) -> Quiz {
    let title = page.text(prop::TITLE).unwrap_or_default();
    let number_of_questions = page
        .number(prop::NUMBER_OF_QUESTIONS)
        .map(|n| n.round().clamp(0.0, i16::MAX as f64) as i16)
        .unwrap_or(0);

    let mut quiz = Quiz::new(&page.id, &title, page.select(prop::TOPIC), number_of_questions);
    quiz.questions_content = page.text(prop::QUESTIONS_CONTENT).filter(|c| !c.is_empty());
    quiz.created_at = page.datetime(prop::CREATED_AT).or(page.created_time);
    quiz
}

fn new_quiz_properties(quiz: &NewQuiz) -> Properties {
    let mut properties = Properties::new();
    properties.insert(prop::TITLE.to_string(), PropertyValue::title(&quiz.title));
    properties.insert(prop::TOPIC.to_string(), PropertyValue::select(&quiz.topic));
    properties.insert(
        prop::NUMBER_OF_QUESTIONS.to_string(),
        PropertyValue::number(f64::from(quiz.number_of_questions)),
    );
    properties.insert(prop::QUESTIONS_CONTENT.to_string(), PropertyValue::rich_text(""));
    properties.insert(
        prop::CREATED_AT.to_string(),
        PropertyValue::date(Utc::now().date_naive()),
    );
    properties
}

#[async_trait]
impl QuizRepository for StoreQuizRepository {
    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>> {
        let database_id = require_database(&self.database_id, "NOTION_DATABASE_ID_QUIZZES")?;
        let query = DatabaseQuery::new().sort(prop::CREATED_AT, SortDirection::Descending);

        let pages = self.store.query(database_id, &query).await?;
        let mut quizzes: Vec<Quiz> = pages.iter().map(quiz_from_page).collect();
        sort_newest_first(&mut quizzes);
        Ok(quizzes)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        require_database(&self.database_id, "NOTION_DATABASE_ID_QUIZZES")?;

        let page = match self.store.retrieve(id).await {
            Ok(page) => page,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(err) => return Err(err),
        };

        if !has_quiz_shape(&page) {
            log::warn!("Page {} does not have the quiz properties", id);
            return Ok(None);
        }
        Ok(Some(quiz_from_page(&page)))
    }

    async fn create(&self, quiz: NewQuiz) -> AppResult<Quiz> {
        let database_id = require_database(&self.database_id, "NOTION_DATABASE_ID_QUIZZES")?;

        let page = self
            .store
            .create(database_id, new_quiz_properties(&quiz))
            .await?;

        let mut created = Quiz::new(&page.id, &quiz.title, Some(&quiz.topic), quiz.number_of_questions);
        created.created_at = page.created_time.or(created.created_at);
        Ok(created)
    }

    async fn record_score(&self, id: &str, result: ScoreResult) -> AppResult<()> {
        let mut properties = Properties::new();
        properties.insert(
            prop::LAST_SCORE.to_string(),
            PropertyValue::number(result.score as f64),
        );
        properties.insert(
            prop::LAST_ATTEMPTED.to_string(),
            PropertyValue::date(Utc::now().date_naive()),
        );

        self.store.update(id, properties).await?;
        Ok(())
    }
}
