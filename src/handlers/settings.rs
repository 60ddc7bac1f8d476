// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentUser,
    models::settings::{SystemSettings, ToggleKillswitchRequest},
};

// GET /api/settings/killswitch
#[utoipa::path(
    get,
    path = "/api/settings/killswitch",
    tag = "Settings",
    responses(
        (status = 200, description = "Estado atual do killswitch", body = SystemSettings)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_killswitch(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.settings_service.get_settings().await?;
    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings/killswitch
#[utoipa::path(
    put,
    path = "/api/settings/killswitch",
    tag = "Settings",
    request_body = ToggleKillswitchRequest,
    responses(
        (status = 200, description = "Killswitch alterado", body = SystemSettings),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_killswitch(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<ToggleKillswitchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state
        .settings_service
        .toggle(&identity, payload.enabled)
        .await?;

    Ok((StatusCode::OK, Json(updated)))
}
