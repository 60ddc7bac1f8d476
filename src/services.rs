pub mod auth;
pub mod break_service;
pub mod chat_service;
pub mod image_service;
pub mod mistake_service;
pub mod notification_service;
pub mod request_service;
pub mod settings_service;
