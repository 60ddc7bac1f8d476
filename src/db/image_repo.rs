// src/db/image_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::images::HoldImage};

const IMAGE_COLUMNS: &str = "id, uploader, image_data, created_at";

#[derive(Clone)]
pub struct ImageRepository {
    pool: SqlitePool,
}

impl ImageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        uploader: &str,
        image_data: &[u8],
    ) -> Result<HoldImage, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, HoldImage>(&format!(
            r#"
            INSERT INTO hold_images (uploader, image_data, created_at)
            VALUES (?, ?, ?)
            RETURNING {IMAGE_COLUMNS}
            "#
        ))
        .bind(uploader)
        .bind(image_data)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn list_all(&self) -> Result<Vec<HoldImage>, AppError> {
        let images = sqlx::query_as::<_, HoldImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM hold_images ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    pub async fn latest(&self) -> Result<Option<HoldImage>, AppError> {
        let image = sqlx::query_as::<_, HoldImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM hold_images ORDER BY created_at DESC, id DESC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    pub async fn clear_all<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM hold_images").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
