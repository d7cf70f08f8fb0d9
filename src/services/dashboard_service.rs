use std::sync::Arc;

use crate::{
    models::dto::response::DashboardOverview,
    services::{
        flashcard_service::FlashcardService, quiz_service::QuizService,
        summary_service::SummaryService,
    },
};

pub struct DashboardService {
    quiz_service: Arc<QuizService>,
    flashcard_service: Arc<FlashcardService>,
    summary_service: Arc<SummaryService>,
}

impl DashboardService {
    pub fn new(
        quiz_service: Arc<QuizService>,
        flashcard_service: Arc<FlashcardService>,
        summary_service: Arc<SummaryService>,
    ) -> Self {
        Self {
            quiz_service,
            flashcard_service,
            summary_service,
        }
    }

    /// Counts are fetched concurrently; each one degrades on its own.
    pub async fn overview(&self) -> DashboardOverview {
        let (quizzes, flashcards, summaries) = futures::join!(
            self.quiz_service.list_quizzes(),
            self.flashcard_service.list_flashcards(None),
            self.summary_service.list_summaries(),
        );

        let notices = [quizzes.notice, flashcards.notice, summaries.notice]
            .into_iter()
            .flatten()
            .collect();

        DashboardOverview {
            quizzes: quizzes.items.len(),
            flashcards: flashcards.items.len(),
            summaries: summaries.items.len(),
            notices,
        }
    }
}
