#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use study_companion::{
    config::Config,
    constants::properties::{flashcard, quiz},
    errors::{AppError, AppResult},
    store::{
        ContentStore, DatabaseQuery, FilterCondition, Page, Properties, PropertyValue,
        SortDirection,
    },
};

pub const QUIZZES_DB: &str = "quizzes-db";
pub const FLASHCARDS_DB: &str = "flashcards-db";
pub const UPLOADS_DB: &str = "uploads-db";

pub const THREE_QUESTIONS: &str = r#"[
    {"question": "Q1", "options": ["A", "B"], "correctAnswer": "A"},
    {"question": "Q2", "options": ["B", "X"], "correctAnswer": "X"},
    {"question": "Q3", "options": ["C", "D"], "correctAnswer": "C"}
]"#;

/// A content store kept in memory. Applies select filters and the first sort
/// the way the remote store does.
#[derive(Default)]
pub struct InMemoryContentStore {
    databases: RwLock<HashMap<String, Vec<Page>>>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryContentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn seed(&self, database_id: &str, page: Page) {
        self.databases
            .write()
            .await
            .entry(database_id.to_string())
            .or_default()
            .push(page);
    }

    pub async fn page(&self, page_id: &str) -> Option<Page> {
        self.databases
            .read()
            .await
            .values()
            .flatten()
            .find(|p| p.id == page_id)
            .cloned()
    }

    fn begin(&self) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::StoreError("service_unavailable: store is down".to_string()));
        }
        Ok(())
    }
}

fn matches_filter(page: &Page, query: &DatabaseQuery) -> bool {
    match &query.filter {
        None => true,
        Some(filter) => match &filter.condition {
            FilterCondition::Select { equals } => page.select(&filter.property) == Some(equals.as_str()),
        },
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn query(&self, database_id: &str, query: &DatabaseQuery) -> AppResult<Vec<Page>> {
        self.begin()?;
        let databases = self.databases.read().await;
        let mut pages: Vec<Page> = databases
            .get(database_id)
            .map(|pages| pages.iter().filter(|p| matches_filter(p, query)).cloned().collect())
            .unwrap_or_default();

        if let Some(sort) = query.sorts.first() {
            pages.sort_by(|a, b| {
                let ordering = a.datetime(&sort.property).cmp(&b.datetime(&sort.property));
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        Ok(pages)
    }

    async fn retrieve(&self, page_id: &str) -> AppResult<Page> {
        self.begin()?;
        self.page(page_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("object_not_found: {}", page_id)))
    }

    async fn create(&self, database_id: &str, properties: Properties) -> AppResult<Page> {
        self.begin()?;
        let page = Page {
            id: Uuid::new_v4().to_string(),
            created_time: Some(Utc::now()),
            properties,
        };
        self.seed(database_id, page.clone()).await;
        Ok(page)
    }

    async fn update(&self, page_id: &str, properties: Properties) -> AppResult<Page> {
        self.begin()?;
        let mut databases = self.databases.write().await;
        let page = databases
            .values_mut()
            .flatten()
            .find(|p| p.id == page_id)
            .ok_or_else(|| AppError::NotFound(format!("object_not_found: {}", page_id)))?;

        page.properties.extend(properties);
        Ok(page.clone())
    }
}

pub fn quiz_page(id: &str, title: &str, questions: &str, created: &str) -> Page {
    let mut properties = Properties::new();
    properties.insert(quiz::TITLE.to_string(), PropertyValue::title(title));
    properties.insert(quiz::TOPIC.to_string(), PropertyValue::select("History"));
    properties.insert(quiz::NUMBER_OF_QUESTIONS.to_string(), PropertyValue::number(3.0));
    properties.insert(
        quiz::QUESTIONS_CONTENT.to_string(),
        PropertyValue::rich_text(questions),
    );
    let day = NaiveDate::parse_from_str(created, "%Y-%m-%d").expect("fixture date");
    properties.insert(quiz::CREATED_AT.to_string(), PropertyValue::date(day));

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

/// A fully configured environment with caching off.
pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("NOTION_API_KEY", "secret_test_key"),
        ("NOTION_DATABASE_ID_QUIZZES", QUIZZES_DB),
        ("NOTION_DATABASE_ID_FLASHCARDS", FLASHCARDS_DB),
        ("NOTION_DATABASE_ID_UPLOADS", UPLOADS_DB),
        ("CACHE_TTL_SECS", "0"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    Config::from_lookup(|key| vars.get(key).cloned())
}
