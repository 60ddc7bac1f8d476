// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Linha única (id = 1) criada pela migração inicial
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    #[schema(ignore)]
    pub id: i64,

    #[schema(example = false)]
    pub killswitch_enabled: bool,

    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleKillswitchRequest {
    #[schema(example = true)]
    pub enabled: bool,
}
