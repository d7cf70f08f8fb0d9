pub mod attempt_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod study_handler;

use actix_web::web;

use crate::auth::AuthMiddleware;

pub use health_handler::{health_check, health_check_live, health_check_ready};

/// Registers every route. `/api` is gated by the configured auth policy.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(quiz_handler::list_quizzes)
                .service(quiz_handler::create_quiz)
                .service(quiz_handler::get_last_result)
                .service(quiz_handler::get_quiz)
                .service(attempt_handler::start_attempt)
                .service(attempt_handler::get_attempt)
                .service(attempt_handler::answer_question)
                .service(attempt_handler::next_question)
                .service(attempt_handler::previous_question)
                .service(attempt_handler::submit_attempt)
                .service(attempt_handler::get_attempt_result)
                .service(attempt_handler::discard_attempt)
                .service(study_handler::list_flashcards)
                .service(study_handler::create_flashcard)
                .service(study_handler::review_flashcard)
                .service(study_handler::list_summaries)
                .service(study_handler::register_upload)
                .service(study_handler::summarize_upload)
                .service(study_handler::dashboard)
                .service(study_handler::chat),
        );
}
