// src/models/mistakes.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mistake {
    pub id: i64,
    /// Quem registrou o erro (líder de equipe).
    #[schema(example = "admin")]
    pub team_leader: String,
    #[schema(example = "maria")]
    pub agent_name: String,
    #[schema(example = "TCK-500")]
    pub ticket_id: String,
    pub error_description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMistakePayload {
    #[validate(length(min = 1, message = "O nome do agente é obrigatório."))]
    #[schema(example = "maria")]
    pub agent_name: String,
    #[validate(length(min = 1, message = "O ticket é obrigatório."))]
    #[schema(example = "TCK-500")]
    pub ticket_id: String,
    #[validate(length(min = 1, message = "Descreva o erro."))]
    pub error_description: String,
}
