use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::AnswerRequest,
};

#[post("/quizzes/{id}/attempts")]
async fn start_attempt(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (attempt_id, response) = state.attempt_service.start(&auth.0.sub, &quiz_id).await?;
    log::info!("{} started attempt {} on quiz {}", auth.0.sub, attempt_id, quiz_id);

    Ok(HttpResponse::Created()
        .insert_header(("Location", format!("/api/attempts/{}", attempt_id)))
        .json(response))
}

#[get("/attempts/{id}")]
async fn get_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.attempt_service.view(&auth.0.sub, &id).await?))
}

#[put("/attempts/{id}/answer")]
async fn answer_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<AnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let response = state.attempt_service.answer(&auth.0.sub, &id, &request.option).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/attempts/{id}/next")]
async fn next_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.attempt_service.next(&auth.0.sub, &id).await?))
}

#[post("/attempts/{id}/previous")]
async fn previous_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.attempt_service.previous(&auth.0.sub, &id).await?))
}

#[post("/attempts/{id}/submit")]
async fn submit_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.attempt_service.submit(&auth.0.sub, &id).await?))
}

#[get("/attempts/{id}/result")]
async fn get_attempt_result(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.attempt_service.result(&auth.0.sub, &id).await?))
}

#[delete("/attempts/{id}")]
async fn discard_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.attempt_service.discard(&auth.0.sub, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
