use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::CreateQuizRequest,
        response::{ApiResponse, QuizSummary},
    },
};

/// Always 200; a store problem shows up as a notice next to an empty list.
#[get("/quizzes")]
async fn list_quizzes(state: web::Data<AppState>, _auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(state.quiz_service.list_quizzes().await)
}

#[post("/quizzes")]
async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.create_quiz(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse {
        data: QuizSummary::from(quiz),
        message: "Quiz created".to_string(),
    }))
}

#[get("/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/quizzes/{id}/last-result")]
async fn get_last_result(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let report = state.attempt_service.last_result(&auth.0.sub, &id).await?;
    Ok(HttpResponse::Ok().json(report))
}
