// src/models/requests.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Gravado no banco exatamente com o nome da variante ("Email", "Phone", "Ticket")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum RequestType {
    Email,
    Phone,
    Ticket,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: i64,
    #[schema(example = "maria")]
    pub agent_name: String,
    pub request_type: RequestType,
    #[schema(example = "TCK-1024")]
    pub identifier: String,
    #[schema(example = "Cliente pediu retorno por telefone")]
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestPayload {
    pub request_type: RequestType,
    #[validate(length(min = 1, message = "O identificador é obrigatório."))]
    #[schema(example = "TCK-1024")]
    pub identifier: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetCompletedPayload {
    #[schema(example = true)]
    pub completed: bool,
}
