// src/handlers/requests.rs

use axum::{
    extract::{Path, Query, State},
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
    models::requests::{CreateRequestPayload, Request, SetCompletedPayload},
};

#[utoipa::path(
    get,
    path = "/api/requests",
    tag = "Requests",
    responses((status = 200, description = "Solicitações, mais recentes primeiro", body = Vec<Request>)),
    security(("api_jwt" = []))
)]
pub async fn list_requests(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let requests = app_state.request_service.list_all().await?;
    Ok(Json(requests))
}

#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "Requests",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Solicitação registrada", body = Request),
        (status = 423, description = "Sistema bloqueado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_request(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<CreateRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let request = app_state
        .request_service
        .add(&identity, payload.request_type, &payload.identifier, &payload.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "/api/requests/search",
    tag = "Requests",
    params(SearchQuery),
    responses((status = 200, description = "Resultado da busca", body = Vec<Request>)),
    security(("api_jwt" = []))
)]
pub async fn search_requests(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let requests = app_state.request_service.search(&query.q).await?;
    Ok(Json(requests))
}

#[utoipa::path(
    put,
    path = "/api/requests/{id}/completed",
    tag = "Requests",
    request_body = SetCompletedPayload,
    params(("id" = i64, Path, description = "ID da solicitação")),
    responses(
        (status = 200, description = "Solicitação atualizada", body = Request),
        (status = 404, description = "Solicitação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_request_completed(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<SetCompletedPayload>,
) -> Result<impl IntoResponse, AppError> {
    let request = app_state
        .request_service
        .set_completed(&identity, id, payload.completed)
        .await?;
    Ok(Json(request))
}

#[utoipa::path(
    delete,
    path = "/api/requests",
    tag = "Requests",
    responses(
        (status = 200, description = "Todas as solicitações apagadas", body = ClearedResponse),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn clear_requests(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.request_service.clear_all(&identity).await?;
    Ok(Json(ClearedResponse { removed }))
}
