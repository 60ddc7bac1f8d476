// src/handlers/images.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::ClearedResponse,
    middleware::auth::CurrentUser,
    models::images::{HoldImageResponse, UploadImagePayload},
};

#[utoipa::path(
    get,
    path = "/api/images",
    tag = "Images",
    responses((status = 200, description = "Imagens de espera", body = Vec<HoldImageResponse>)),
    security(("api_jwt" = []))
)]
pub async fn list_images(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let images = app_state.image_service.list_all().await?;
    Ok(Json(images))
}

#[utoipa::path(
    get,
    path = "/api/images/latest",
    tag = "Images",
    responses(
        (status = 200, description = "Imagem mais recente", body = HoldImageResponse),
        (status = 404, description = "Nenhuma imagem enviada")
    ),
    security(("api_jwt" = []))
)]
pub async fn latest_image(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let image = app_state
        .image_service
        .latest()
        .await?
        .ok_or(AppError::NotFound("Imagem"))?;
    Ok(Json(image))
}

#[utoipa::path(
    post,
    path = "/api/images",
    tag = "Images",
    request_body = UploadImagePayload,
    responses(
        (status = 201, description = "Imagem enviada", body = HoldImageResponse),
        (status = 400, description = "Base64 inválido"),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_image(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<UploadImagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let image = app_state
        .image_service
        .upload(&identity, &payload.image_base64)
        .await?;
    Ok((StatusCode::CREATED, Json(image)))
}

#[utoipa::path(
    delete,
    path = "/api/images",
    tag = "Images",
    responses(
        (status = 200, description = "Imagens apagadas", body = ClearedResponse),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn clear_images(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.image_service.clear_all(&identity).await?;
    Ok(Json(ClearedResponse { removed }))
}
