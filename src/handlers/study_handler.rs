use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{ChatRequest, CreateFlashcardRequest, FlashcardQuery, RegisterUploadRequest},
        response::ApiResponse,
    },
};

#[get("/flashcards")]
async fn list_flashcards(
    state: web::Data<AppState>,
    query: web::Query<FlashcardQuery>,
    _auth: AuthenticatedUser,
) -> HttpResponse {
    let listing = state
        .flashcard_service
        .list_flashcards(query.topic.as_deref())
        .await;
    HttpResponse::Ok().json(listing)
}

#[post("/flashcards")]
async fn create_flashcard(
    state: web::Data<AppState>,
    request: web::Json<CreateFlashcardRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let card = state
        .flashcard_service
        .create_flashcard(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse {
        data: card,
        message: "Flashcard created".to_string(),
    }))
}

#[post("/flashcards/{id}/review")]
async fn review_flashcard(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let card = state.flashcard_service.mark_reviewed(&id).await?;
    Ok(HttpResponse::Ok().json(card))
}

#[get("/summaries")]
async fn list_summaries(state: web::Data<AppState>, _auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(state.summary_service.list_summaries().await)
}

#[post("/uploads")]
async fn register_upload(
    state: web::Data<AppState>,
    request: web::Json<RegisterUploadRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let upload = state
        .summary_service
        .register_upload(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse {
        data: upload,
        message: "Upload registered".to_string(),
    }))
}

#[post("/uploads/{id}/summarize")]
async fn summarize_upload(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let upload = state.summary_service.summarize_upload(&id).await?;
    Ok(HttpResponse::Ok().json(upload))
}

#[get("/dashboard")]
async fn dashboard(state: web::Data<AppState>, _auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard_service.overview().await)
}

#[post("/chat")]
async fn chat(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let exchange = state.chat_service.reply(request.into_inner())?;
    Ok(HttpResponse::Ok().json(exchange))
}
