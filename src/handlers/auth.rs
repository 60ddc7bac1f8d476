// src/handlers/auth.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentUser,
    models::auth::{AuthResponse, Identity, LoginUserPayload},
};

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 401, description = "Usuário ou senha inválidos")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login_user(payload.username.trim(), &payload.password)
        .await?;

    Ok(Json(response))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Identidade de quem está logado", body = Identity)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(CurrentUser(identity): CurrentUser) -> Json<Identity> {
    Json(identity)
}
