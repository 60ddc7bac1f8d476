// src/models/images.rs

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct HoldImage {
    pub id: i64,
    pub uploader: String,
    pub image_data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

// O blob vai para o cliente como base64
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoldImageResponse {
    pub id: i64,
    pub uploader: String,
    pub image_base64: String,
    pub created_at: DateTime<Utc>,
}

impl From<HoldImage> for HoldImageResponse {
    fn from(image: HoldImage) -> Self {
        Self {
            id: image.id,
            uploader: image.uploader,
            image_base64: STANDARD.encode(&image.image_data),
            created_at: image.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadImagePayload {
    /// Conteúdo da imagem em base64 (sem o prefixo `data:`).
    #[validate(length(min = 1, message = "A imagem é obrigatória."))]
    pub image_base64: String,
}
