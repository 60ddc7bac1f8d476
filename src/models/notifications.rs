// src/models/notifications.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{chat::ChatMessage, requests::Request};

// Consulta sem estado: o cliente guarda o instante da última leitura
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    /// Instante (RFC 3339) da última consulta.
    pub since: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    pub since: DateTime<Utc>,
    pub new_requests: Vec<Request>,
    pub new_messages: Vec<ChatMessage>,
    /// Subconjunto de `new_messages` que menciona quem consulta.
    pub mentions: Vec<ChatMessage>,
}
