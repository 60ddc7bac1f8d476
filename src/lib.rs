// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::{config::AppState, docs::ApiDoc, middleware::auth::auth_guard};

/// Monta o router completo. Só `/api/health`, o documento OpenAPI e o login
/// ficam fora do `auth_guard`.
pub fn app(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}",
            put(handlers::users::update_user).delete(handlers::users::delete_user),
        );

    let settings_routes = Router::new().route(
        "/killswitch",
        get(handlers::settings::get_killswitch).put(handlers::settings::set_killswitch),
    );

    let request_routes = Router::new()
        .route(
            "/",
            get(handlers::requests::list_requests)
                .post(handlers::requests::create_request)
                .delete(handlers::requests::clear_requests),
        )
        .route("/search", get(handlers::requests::search_requests))
        .route("/{id}/completed", put(handlers::requests::set_request_completed));

    let mistake_routes = Router::new()
        .route(
            "/",
            get(handlers::mistakes::list_mistakes)
                .post(handlers::mistakes::create_mistake)
                .delete(handlers::mistakes::clear_mistakes),
        )
        .route("/search", get(handlers::mistakes::search_mistakes));

    let chat_routes = Router::new()
        .route(
            "/",
            get(handlers::chat::list_messages)
                .post(handlers::chat::send_message)
                .delete(handlers::chat::clear_messages),
        )
        .route("/search", get(handlers::chat::search_messages))
        .route("/mentions", get(handlers::chat::my_mentions));

    let image_routes = Router::new()
        .route(
            "/",
            get(handlers::images::list_images)
                .post(handlers::images::upload_image)
                .delete(handlers::images::clear_images),
        )
        .route("/latest", get(handlers::images::latest_image));

    let notification_routes =
        Router::new().route("/", get(handlers::notifications::poll_notifications));

    let break_routes = Router::new()
        // Intervalos
        .route(
            "/slots",
            get(handlers::breaks::list_slots).post(handlers::breaks::create_slot),
        )
        .route(
            "/slots/{id}",
            put(handlers::breaks::update_slot).delete(handlers::breaks::delete_slot),
        )
        .route("/available", get(handlers::breaks::available_slots))
        .route("/usage", get(handlers::breaks::slot_usage))
        // Reservas
        .route(
            "/bookings",
            get(handlers::breaks::bookings_on)
                .post(handlers::breaks::book_slot)
                .delete(handlers::breaks::clear_bookings),
        )
        .route("/bookings/me", get(handlers::breaks::my_bookings))
        .route("/bookings/{id}", delete(handlers::breaks::cancel_booking))
        // Templates
        .route(
            "/templates",
            get(handlers::breaks::list_templates).post(handlers::breaks::save_template),
        )
        .route(
            "/templates/{name}",
            get(handlers::breaks::template_rows).delete(handlers::breaks::delete_template),
        )
        .route("/templates/{name}/apply", post(handlers::breaks::apply_template));

    // Tudo abaixo exige um Bearer válido
    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/settings", settings_routes)
        .nest("/requests", request_routes)
        .nest("/mistakes", mistake_routes)
        .nest("/chat", chat_routes)
        .nest("/images", image_routes)
        .nest("/notifications", notification_routes)
        .nest("/breaks", break_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .with_state(app_state)
}
