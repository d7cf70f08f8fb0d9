use std::{sync::Arc, time::Duration};

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{quiz_question::decode_questions_or_placeholder, Quiz, ScoreResult},
        dto::{
            request::CreateQuizRequest,
            response::{Listing, QuizDetail, QuizSummary},
        },
    },
    repositories::QuizRepository,
    services::degraded_notice,
    store::QueryCache,
};

const CATALOG_KEY: &str = "quizzes";

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    catalog_cache: QueryCache<Vec<Quiz>>,
    detail_cache: QueryCache<Quiz>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>, cache_ttl: Duration) -> Self {
        Self {
            repository,
            catalog_cache: QueryCache::new(cache_ttl),
            detail_cache: QueryCache::new(cache_ttl),
        }
    }

    pub async fn fetch_quizzes(&self) -> AppResult<Vec<Quiz>> {
        if let Some(quizzes) = self.catalog_cache.get(CATALOG_KEY).await {
            return Ok(quizzes);
        }
        let quizzes = self.repository.list_quizzes().await?;
        self.catalog_cache.put(CATALOG_KEY, quizzes.clone()).await;
        Ok(quizzes)
    }

    /// The catalog never fails; problems come back as a notice.
    pub async fn list_quizzes(&self) -> Listing<QuizSummary> {
        match self.fetch_quizzes().await {
            Ok(quizzes) => Listing::ok(quizzes.into_iter().map(QuizSummary::from).collect()),
            Err(err) => Listing::degraded(degraded_notice("Quizzes", &err)),
        }
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let quiz = self.repository.create(request.into_new_quiz()).await?;
        self.catalog_cache.invalidate(CATALOG_KEY).await;
        log::info!("Created quiz {} ({})", quiz.id, quiz.title);
        Ok(quiz)
    }

    /// Resolves a quiz with its questions. Every failure reads as not found.
    pub async fn get_quiz(&self, id: &str) -> AppResult<QuizDetail> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::NotFound("Quiz not found".to_string()));
        }

        let quiz = match self.find_quiz(id).await {
            Ok(Some(quiz)) => quiz,
            Ok(None) => {
                log::info!("Quiz {} does not exist", id);
                return Err(not_found(id));
            }
            Err(err) => {
                log::error!("Failed to load quiz {}: {}", id, err);
                return Err(not_found(id));
            }
        };

        let questions = decode_questions_or_placeholder(&quiz.id, quiz.questions_content.as_deref());
        Ok(QuizDetail {
            id: quiz.id,
            title: quiz.title,
            topic: quiz.topic,
            number_of_questions: quiz.number_of_questions,
            questions,
            created_at: quiz.created_at,
        })
    }

    pub async fn record_score(&self, id: &str, result: ScoreResult) -> AppResult<()> {
        self.repository.record_score(id, result).await
    }

    async fn find_quiz(&self, id: &str) -> AppResult<Option<Quiz>> {
        let key = format!("quiz:{}", id);
        if let Some(quiz) = self.detail_cache.get(&key).await {
            return Ok(Some(quiz));
        }

        let quiz = self.repository.find_by_id(id).await?;
        if let Some(quiz) = &quiz {
            self.detail_cache.put(&key, quiz.clone()).await;
        }
        Ok(quiz)
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Quiz with id '{}' not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockQuizRepository;
    use crate::test_utils::fixtures::THREE_QUESTIONS;

    fn quiz_with(content: Option<&str>) -> Quiz {
        let mut quiz = Quiz::new("quiz-1", "Basics", Some("Math"), 3);
        quiz.questions_content = content.map(str::to_string);
        quiz
    }

    fn service(repository: MockQuizRepository, ttl: Duration) -> QuizService {
        QuizService::new(Arc::new(repository), ttl)
    }

    #[tokio::test]
    async fn catalog_failure_degrades_to_notice() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_list_quizzes()
            .returning(|| Err(AppError::StoreError("service_unavailable".to_string())));

        let listing = service(repository, Duration::ZERO).list_quizzes().await;

        assert!(listing.items.is_empty());
        assert!(listing.notice.is_some());
    }

    #[tokio::test]
    async fn catalog_is_cached_until_a_quiz_is_created() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_list_quizzes()
            .times(2)
            .returning(|| Ok(vec![quiz_with(None)]));
        repository
            .expect_create()
            .times(1)
            .returning(|new| Ok(Quiz::new("quiz-2", &new.title, Some(&new.topic), new.number_of_questions)));

        let service = service(repository, Duration::from_secs(60));
        service.list_quizzes().await;
        service.list_quizzes().await;

        service
            .create_quiz(CreateQuizRequest {
                title: "Algebra".to_string(),
                topic: None,
                number_of_questions: 5,
            })
            .await
            .expect("create should work");

        let listing = service.list_quizzes().await;
        assert_eq!(listing.items.len(), 1);
    }

    #[tokio::test]
    async fn invalid_title_never_reaches_the_store() {
        let mut repository = MockQuizRepository::new();
        repository.expect_create().times(0);

        let result = service(repository, Duration::ZERO)
            .create_quiz(CreateQuizRequest {
                title: String::new(),
                topic: None,
                number_of_questions: 10,
            })
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn blank_id_is_not_found_without_a_lookup() {
        let mut repository = MockQuizRepository::new();
        repository.expect_find_by_id().times(0);

        let result = service(repository, Duration::ZERO).get_quiz("  ").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn store_failure_reads_as_not_found() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Err(AppError::StoreError("bad_gateway".to_string())));

        let result = service(repository, Duration::ZERO).get_quiz("quiz-1").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn detail_decodes_questions() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Ok(Some(quiz_with(Some(THREE_QUESTIONS)))));

        let detail = service(repository, Duration::ZERO)
            .get_quiz("quiz-1")
            .await
            .expect("quiz should resolve");

        assert_eq!(detail.questions.len(), 3);
        assert_eq!(detail.questions[1].correct_answer, "X");
    }

    #[tokio::test]
    async fn malformed_content_yields_one_placeholder() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Ok(Some(quiz_with(Some("not json")))));

        let detail = service(repository, Duration::ZERO)
            .get_quiz("quiz-1")
            .await
            .expect("quiz should resolve");

        assert_eq!(detail.questions.len(), 1);
        assert!(detail.questions[0].options.is_empty());
        assert!(detail.questions[0].correct_answer.is_empty());
    }

    #[tokio::test]
    async fn failed_create_leaves_the_cached_catalog_alone() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_list_quizzes()
            .times(1)
            .returning(|| Ok(vec![quiz_with(None)]));
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::StoreError("502: upstream unavailable".to_string())));

        let service = service(repository, Duration::from_secs(60));
        assert_eq!(service.list_quizzes().await.items.len(), 1);

        let result = service
            .create_quiz(CreateQuizRequest {
                title: "Algebra".to_string(),
                topic: None,
                number_of_questions: 5,
            })
            .await;
        assert!(matches!(result, Err(AppError::StoreError(_))));

        let listing = service.list_quizzes().await;
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.items[0].id, "quiz-1");
        assert!(listing.notice.is_none());
    }
}
