// src/db/mistake_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::mistakes::Mistake};

const MISTAKE_COLUMNS: &str =
    "id, team_leader, agent_name, ticket_id, error_description, created_at";

#[derive(Clone)]
pub struct MistakeRepository {
    pool: SqlitePool,
}

impl MistakeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        team_leader: &str,
        agent_name: &str,
        ticket_id: &str,
        error_description: &str,
    ) -> Result<Mistake, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Mistake>(&format!(
            r#"
            INSERT INTO mistakes (team_leader, agent_name, ticket_id, error_description, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {MISTAKE_COLUMNS}
            "#
        ))
        .bind(team_leader)
        .bind(agent_name)
        .bind(ticket_id)
        .bind(error_description)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn list_all(&self) -> Result<Vec<Mistake>, AppError> {
        let mistakes = sqlx::query_as::<_, Mistake>(&format!(
            "SELECT {MISTAKE_COLUMNS} FROM mistakes ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(mistakes)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Mistake>, AppError> {
        let mistakes = sqlx::query_as::<_, Mistake>(&format!(
            r#"
            SELECT {MISTAKE_COLUMNS} FROM mistakes
            WHERE instr(lower(ticket_id), lower(?1)) > 0
               OR instr(lower(agent_name), lower(?1)) > 0
               OR instr(lower(error_description), lower(?1)) > 0
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(mistakes)
    }

    pub async fn clear_all<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM mistakes").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
