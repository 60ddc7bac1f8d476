// src/db/template_repo.rs

use chrono::Utc;
use sqlx::{types::Json, Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::breaks::{BreakTemplate, SlotDefinition},
};

const TEMPLATE_COLUMNS: &str = "id, name, slots, created_by, created_at";

#[derive(Clone)]
pub struct TemplateRepository {
    pool: SqlitePool,
}

impl TemplateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // O nome é a chave natural: salvar de novo sobrescreve o documento
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        name: &str,
        slots: &[SlotDefinition],
        created_by: &str,
    ) -> Result<BreakTemplate, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, BreakTemplate>(&format!(
            r#"
            INSERT INTO break_templates (name, slots, created_by, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (name)
            DO UPDATE SET
                slots = excluded.slots,
                created_by = excluded.created_by,
                created_at = excluded.created_at
            RETURNING {TEMPLATE_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(Json(slots))
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn find_by_name<'e, E>(&self, executor: E, name: &str) -> Result<Option<BreakTemplate>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let template = sqlx::query_as::<_, BreakTemplate>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM break_templates WHERE name = ?"
        ))
        .bind(name)
        .fetch_optional(executor)
        .await?;

        Ok(template)
    }

    pub async fn list_all(&self) -> Result<Vec<BreakTemplate>, AppError> {
        let templates = sqlx::query_as::<_, BreakTemplate>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM break_templates ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    pub async fn delete<'e, E>(&self, executor: E, name: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM break_templates WHERE name = ?")
            .bind(name)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
