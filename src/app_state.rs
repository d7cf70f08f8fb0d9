use std::{sync::Arc, time::Duration};

use crate::{
    auth::AuthPolicy,
    config::Config,
    errors::AppResult,
    repositories::{StoreFlashcardRepository, StoreQuizRepository, StoreUploadRepository},
    services::{
        chat_service::ChatService, dashboard_service::DashboardService, flashcard_service::FlashcardService,
        quiz_attempt_service::QuizAttemptService, quiz_service::QuizService,
        summary_service::SummaryService,
    },
    store::{ContentStore, NotionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<QuizAttemptService>,
    pub flashcard_service: Arc<FlashcardService>,
    pub summary_service: Arc<SummaryService>,
    pub dashboard_service: Arc<DashboardService>,
    pub chat_service: Arc<ChatService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let store = Arc::new(NotionStore::new(&config)?);
        Ok(Self::with_store(config, store))
    }

    /// Wires every service over the given store.
    pub fn with_store(config: Config, store: Arc<dyn ContentStore>) -> Self {
        let quiz_repository = Arc::new(StoreQuizRepository::new(
            store.clone(),
            config.quizzes_database_id.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository,
            Duration::from_secs(config.cache_ttl_secs),
        ));
        let attempt_service = Arc::new(QuizAttemptService::new(
            quiz_service.clone(),
            config.record_scores_in_store,
        ));

        let flashcard_repository = Arc::new(StoreFlashcardRepository::new(
            store.clone(),
            config.flashcards_database_id.clone(),
        ));
        let flashcard_service = Arc::new(FlashcardService::new(flashcard_repository));

        let upload_repository = Arc::new(StoreUploadRepository::new(
            store,
            config.uploads_database_id.clone(),
        ));
        let summary_service = Arc::new(SummaryService::new(upload_repository));

        let dashboard_service = Arc::new(DashboardService::new(
            quiz_service.clone(),
            flashcard_service.clone(),
            summary_service.clone(),
        ));

        Self {
            quiz_service,
            attempt_service,
            flashcard_service,
            summary_service,
            dashboard_service,
            chat_service: Arc::new(ChatService::new()),
            config: Arc::new(config),
        }
    }

    pub fn auth_policy(&self) -> AuthPolicy {
        AuthPolicy::from_config(&self.config)
    }
}
