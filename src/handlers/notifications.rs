// src/handlers/notifications.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentUser,
    models::notifications::{NotificationFeed, NotificationQuery},
};

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    params(NotificationQuery),
    responses((status = 200, description = "Novidades desde o instante informado", body = NotificationFeed)),
    security(("api_jwt" = []))
)]
pub async fn poll_notifications(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Query(query): Query<NotificationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let feed = app_state
        .notification_service
        .since(&identity, query.since)
        .await?;
    Ok(Json(feed))
}
