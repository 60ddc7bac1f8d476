// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Settings ---
        handlers::settings::get_killswitch,
        handlers::settings::set_killswitch,

        // --- Requests ---
        handlers::requests::list_requests,
        handlers::requests::create_request,
        handlers::requests::search_requests,
        handlers::requests::set_request_completed,
        handlers::requests::clear_requests,

        // --- Mistakes ---
        handlers::mistakes::list_mistakes,
        handlers::mistakes::create_mistake,
        handlers::mistakes::search_mistakes,
        handlers::mistakes::clear_mistakes,

        // --- Chat ---
        handlers::chat::list_messages,
        handlers::chat::send_message,
        handlers::chat::search_messages,
        handlers::chat::my_mentions,
        handlers::chat::clear_messages,

        // --- Images ---
        handlers::images::list_images,
        handlers::images::latest_image,
        handlers::images::upload_image,
        handlers::images::clear_images,

        // --- Notifications ---
        handlers::notifications::poll_notifications,

        // --- BREAKS ---
        handlers::breaks::list_slots,
        handlers::breaks::create_slot,
        handlers::breaks::update_slot,
        handlers::breaks::delete_slot,
        handlers::breaks::available_slots,
        handlers::breaks::slot_usage,
        handlers::breaks::book_slot,
        handlers::breaks::my_bookings,
        handlers::breaks::bookings_on,
        handlers::breaks::cancel_booking,
        handlers::breaks::clear_bookings,
        handlers::breaks::list_templates,
        handlers::breaks::save_template,
        handlers::breaks::template_rows,
        handlers::breaks::apply_template,
        handlers::breaks::delete_template,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::Team,
            models::auth::Shift,
            models::auth::User,
            models::auth::Identity,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,

            // --- Settings ---
            models::settings::SystemSettings,
            models::settings::ToggleKillswitchRequest,

            // --- Logs ---
            models::requests::RequestType,
            models::requests::Request,
            models::requests::CreateRequestPayload,
            models::requests::SetCompletedPayload,
            models::mistakes::Mistake,
            models::mistakes::CreateMistakePayload,
            models::chat::ChatMessage,
            models::chat::SendMessagePayload,
            models::images::HoldImageResponse,
            models::images::UploadImagePayload,
            models::notifications::NotificationFeed,
            handlers::ClearedResponse,

            // --- Breaks ---
            models::breaks::BreakSlot,
            models::breaks::SlotUsage,
            models::breaks::BreakBooking,
            models::breaks::SlotDefinition,
            models::breaks::BreakTemplate,
            models::breaks::BookSlotPayload,
            models::breaks::SaveTemplatePayload,
            models::breaks::ApplyTemplatePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Gestão de Usuários"),
        (name = "Settings", description = "Killswitch do Sistema"),
        (name = "Requests", description = "Registro de Solicitações"),
        (name = "Mistakes", description = "Registro de Erros"),
        (name = "Chat", description = "Chat da Equipe e Menções"),
        (name = "Images", description = "Imagens de Espera"),
        (name = "Notifications", description = "Novidades desde a Última Consulta"),
        (name = "Breaks", description = "Intervalos, Reservas e Templates")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_break_routes_and_jwt_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/breaks/bookings"));
        assert!(doc.paths.paths.contains_key("/api/breaks/templates/{name}/apply"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
    }
}
