// src/handlers/mistakes.rs

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
    models::mistakes::{CreateMistakePayload, Mistake},
};

#[utoipa::path(
    get,
    path = "/api/mistakes",
    tag = "Mistakes",
    responses((status = 200, description = "Erros registrados", body = Vec<Mistake>)),
    security(("api_jwt" = []))
)]
pub async fn list_mistakes(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let mistakes = app_state.mistake_service.list_all().await?;
    Ok(Json(mistakes))
}

// O líder de equipe é sempre quem está logado
#[utoipa::path(
    post,
    path = "/api/mistakes",
    tag = "Mistakes",
    request_body = CreateMistakePayload,
    responses(
        (status = 201, description = "Erro registrado", body = Mistake),
        (status = 423, description = "Sistema bloqueado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_mistake(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<CreateMistakePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mistake = app_state
        .mistake_service
        .add(&identity, &payload.agent_name, &payload.ticket_id, &payload.error_description)
        .await?;

    Ok((StatusCode::CREATED, Json(mistake)))
}

#[utoipa::path(
    get,
    path = "/api/mistakes/search",
    tag = "Mistakes",
    params(SearchQuery),
    responses((status = 200, description = "Resultado da busca", body = Vec<Mistake>)),
    security(("api_jwt" = []))
)]
pub async fn search_mistakes(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mistakes = app_state.mistake_service.search(&query.q).await?;
    Ok(Json(mistakes))
}

#[utoipa::path(
    delete,
    path = "/api/mistakes",
    tag = "Mistakes",
    responses(
        (status = 200, description = "Todos os erros apagados", body = ClearedResponse),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn clear_mistakes(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.mistake_service.clear_all(&identity).await?;
    Ok(Json(ClearedResponse { removed }))
}
