// src/handlers/breaks.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::ClearedResponse,
    middleware::auth::CurrentUser,
    models::breaks::{
        ApplyTemplatePayload, BookSlotPayload, BreakBooking, BreakSlot, BreakTemplate, DateQuery,
        SaveTemplatePayload, SlotDefinition, SlotUsage,
    },
};

// =============================================================================
//  INTERVALOS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/breaks/slots",
    tag = "Breaks",
    responses((status = 200, description = "Intervalos vigentes", body = Vec<BreakSlot>)),
    security(("api_jwt" = []))
)]
pub async fn list_slots(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let slots = app_state.break_service.list_slots().await?;
    Ok(Json(slots))
}

#[utoipa::path(
    post,
    path = "/api/breaks/slots",
    tag = "Breaks",
    request_body = SlotDefinition,
    responses(
        (status = 201, description = "Intervalo criado", body = BreakSlot),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_slot(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<SlotDefinition>,
) -> Result<impl IntoResponse, AppError> {
    // validate() roda dentro do serviço, junto com a normalização dos horários
    let slot = app_state.break_service.create_slot(&identity, &payload).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

#[utoipa::path(
    put,
    path = "/api/breaks/slots/{id}",
    tag = "Breaks",
    request_body = SlotDefinition,
    params(("id" = i64, Path, description = "ID do intervalo")),
    responses(
        (status = 200, description = "Intervalo atualizado", body = BreakSlot),
        (status = 404, description = "Intervalo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_slot(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<SlotDefinition>,
) -> Result<impl IntoResponse, AppError> {
    let slot = app_state.break_service.update_slot(&identity, id, &payload).await?;
    Ok(Json(slot))
}

#[utoipa::path(
    delete,
    path = "/api/breaks/slots/{id}",
    tag = "Breaks",
    params(("id" = i64, Path, description = "ID do intervalo")),
    responses(
        (status = 204, description = "Intervalo e reservas removidos"),
        (status = 404, description = "Intervalo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_slot(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.break_service.delete_slot(&identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Disponibilidade para a equipe/turno de quem está logado
#[utoipa::path(
    get,
    path = "/api/breaks/available",
    tag = "Breaks",
    params(DateQuery),
    responses((status = 200, description = "Intervalos com vaga na data", body = Vec<SlotUsage>)),
    security(("api_jwt" = []))
)]
pub async fn available_slots(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, AppError> {
    let slots = app_state
        .break_service
        .available_slots(query.date, identity.team, identity.shift)
        .await?;
    Ok(Json(slots))
}

#[utoipa::path(
    get,
    path = "/api/breaks/usage",
    tag = "Breaks",
    params(DateQuery),
    responses(
        (status = 200, description = "Ocupação de todos os intervalos na data", body = Vec<SlotUsage>),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn slot_usage(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, AppError> {
    let usage = app_state.break_service.slot_usage(&identity, query.date).await?;
    Ok(Json(usage))
}

// =============================================================================
//  RESERVAS
// =============================================================================

#[utoipa::path(
    post,
    path = "/api/breaks/bookings",
    tag = "Breaks",
    request_body = BookSlotPayload,
    responses(
        (status = 201, description = "Reserva feita", body = BreakBooking),
        (status = 404, description = "Intervalo não oferecido na data"),
        (status = 409, description = "Intervalo lotado ou reserva repetida"),
        (status = 423, description = "Sistema bloqueado")
    ),
    security(("api_jwt" = []))
)]
pub async fn book_slot(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<BookSlotPayload>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state
        .break_service
        .book(&identity, payload.break_slot_id, payload.date)
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[utoipa::path(
    get,
    path = "/api/breaks/bookings/me",
    tag = "Breaks",
    responses((status = 200, description = "Reservas de quem está logado", body = Vec<BreakBooking>)),
    security(("api_jwt" = []))
)]
pub async fn my_bookings(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state.break_service.my_bookings(&identity).await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    get,
    path = "/api/breaks/bookings",
    tag = "Breaks",
    params(DateQuery),
    responses(
        (status = 200, description = "Reservas da data", body = Vec<BreakBooking>),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn bookings_on(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state.break_service.bookings_on(&identity, query.date).await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    delete,
    path = "/api/breaks/bookings/{id}",
    tag = "Breaks",
    params(("id" = i64, Path, description = "ID da reserva")),
    responses(
        (status = 204, description = "Reserva cancelada"),
        (status = 403, description = "Reserva de outra pessoa"),
        (status = 404, description = "Reserva não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_booking(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.break_service.cancel_booking(&identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/breaks/bookings",
    tag = "Breaks",
    responses(
        (status = 200, description = "Todas as reservas apagadas", body = ClearedResponse),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn clear_bookings(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.break_service.clear_bookings(&identity).await?;
    Ok(Json(ClearedResponse { removed }))
}

// =============================================================================
//  TEMPLATES
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/breaks/templates",
    tag = "Breaks",
    responses((status = 200, description = "Templates salvos", body = Vec<BreakTemplate>)),
    security(("api_jwt" = []))
)]
pub async fn list_templates(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let templates = app_state.break_service.list_templates().await?;
    Ok(Json(templates))
}

#[utoipa::path(
    post,
    path = "/api/breaks/templates",
    tag = "Breaks",
    request_body = SaveTemplatePayload,
    responses(
        (status = 201, description = "Template salvo", body = BreakTemplate),
        (status = 400, description = "Template vazio ou inválido"),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_template(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<SaveTemplatePayload>,
) -> Result<impl IntoResponse, AppError> {
    let template = app_state
        .break_service
        .save_template(&identity, &payload.name, &payload.slots)
        .await?;
    Ok((StatusCode::CREATED, Json(template)))
}

#[utoipa::path(
    get,
    path = "/api/breaks/templates/{name}",
    tag = "Breaks",
    params(("name" = String, Path, description = "Nome do template")),
    responses((status = 200, description = "Linhas de intervalo do template", body = Vec<BreakSlot>)),
    security(("api_jwt" = []))
)]
pub async fn template_rows(
    State(app_state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.break_service.template_rows(&name).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/breaks/templates/{name}/apply",
    tag = "Breaks",
    request_body = ApplyTemplatePayload,
    params(("name" = String, Path, description = "Nome do template")),
    responses(
        (status = 200, description = "Intervalos criados na data", body = Vec<BreakSlot>),
        (status = 404, description = "Template não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn apply_template(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(name): Path<String>,
    Json(payload): Json<ApplyTemplatePayload>,
) -> Result<impl IntoResponse, AppError> {
    let slots = app_state
        .break_service
        .apply_template(&identity, &name, payload.date)
        .await?;
    Ok(Json(slots))
}

#[utoipa::path(
    delete,
    path = "/api/breaks/templates/{name}",
    tag = "Breaks",
    params(("name" = String, Path, description = "Nome do template")),
    responses(
        (status = 204, description = "Template removido"),
        (status = 404, description = "Template não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_template(
    State(app_state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.break_service.delete_template(&identity, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}
