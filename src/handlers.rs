pub mod auth;
pub mod breaks;
pub mod chat;
pub mod images;
pub mod mistakes;
pub mod notifications;
pub mod requests;
pub mod settings;
pub mod users;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ?q= das buscas; vazio devolve tudo
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Trecho procurado (sem diferenciar maiúsculas/minúsculas).
    #[serde(default)]
    pub q: String,
}

// Resposta das limpezas em massa
#[derive(Debug, Serialize, ToSchema)]
pub struct ClearedResponse {
    #[schema(example = 12)]
    pub removed: u64,
}
