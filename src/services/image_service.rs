// src/services/image_service.rs

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sqlx::SqlitePool;

use crate::{
    common::{db_utils::begin_unlocked, error::AppError},
    db::ImageRepository,
    models::{auth::Identity, images::HoldImageResponse},
};

#[derive(Clone)]
pub struct ImageService {
    repo: ImageRepository,
    pool: SqlitePool,
}

impl ImageService {
    pub fn new(repo: ImageRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    pub async fn upload(&self, identity: &Identity, image_base64: &str) -> Result<HoldImageResponse, AppError> {
        identity.require_admin()?;

        let data = STANDARD
            .decode(image_base64.trim())
            .map_err(|_| AppError::InvalidInput("Imagem não está em base64 válido.".into()))?;
        if data.is_empty() {
            return Err(AppError::InvalidInput("Imagem vazia.".into()));
        }

        let mut tx = begin_unlocked(&self.pool).await?;
        let image = self.repo.create(&mut *tx, &identity.username, &data).await?;
        tx.commit().await?;

        tracing::info!("🖼️ '{}' enviou a imagem #{} ({} bytes).", identity.username, image.id, data.len());
        Ok(image.into())
    }

    pub async fn list_all(&self) -> Result<Vec<HoldImageResponse>, AppError> {
        let images = self.repo.list_all().await?;
        Ok(images.into_iter().map(HoldImageResponse::from).collect())
    }

    pub async fn latest(&self) -> Result<Option<HoldImageResponse>, AppError> {
        Ok(self.repo.latest().await?.map(HoldImageResponse::from))
    }

    pub async fn clear_all(&self, identity: &Identity) -> Result<u64, AppError> {
        identity.require_admin()?;

        let mut tx = begin_unlocked(&self.pool).await?;
        let removed = self.repo.clear_all(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!("🧹 '{}' apagou {} imagens.", identity.username, removed);
        Ok(removed)
    }
}
