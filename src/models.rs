pub mod auth;
pub mod breaks;
pub mod chat;
pub mod images;
pub mod mistakes;
pub mod notifications;
pub mod requests;
pub mod settings;
