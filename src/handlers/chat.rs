// src/handlers/chat.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{ClearedResponse, SearchQuery},
    middleware::auth::CurrentUser,
    models::chat::{ChatMessage, SendMessagePayload},
};

#[utoipa::path(
    get,
    path = "/api/chat",
    tag = "Chat",
    responses((status = 200, description = "Últimas 50 mensagens", body = Vec<ChatMessage>)),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let messages = app_state.chat_service.list_recent().await?;
    Ok(Json(messages))
}

#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = SendMessagePayload,
    responses(
        (status = 201, description = "Mensagem enviada", body = ChatMessage),
        (status = 423, description = "Sistema bloqueado")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<SendMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let message = app_state.chat_service.send(&identity, &payload.body).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    get,
    path = "/api/chat/search",
    tag = "Chat",
    params(SearchQuery),
    responses((status = 200, description = "Resultado da busca", body = Vec<ChatMessage>)),
    security(("api_jwt" = []))
)]
pub async fn search_messages(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let messages = app_state.chat_service.search(&query.q).await?;
    Ok(Json(messages))
}

// Caixa de menções de quem está logado
#[utoipa::path(
    get,
    path = "/api/chat/mentions",
    tag = "Chat",
    responses((status = 200, description = "Mensagens que mencionam o usuário", body = Vec<ChatMessage>)),
    security(("api_jwt" = []))
)]
pub async fn my_mentions(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let messages = app_state.chat_service.mentions_for(&identity).await?;
    Ok(Json(messages))
}

#[utoipa::path(
    delete,
    path = "/api/chat",
    tag = "Chat",
    responses(
        (status = 200, description = "Histórico apagado", body = ClearedResponse),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn clear_messages(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.chat_service.clear_all(&identity).await?;
    Ok(Json(ClearedResponse { removed }))
}
