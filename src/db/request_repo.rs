// src/db/request_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::requests::{Request, RequestType},
};

const REQUEST_COLUMNS: &str =
    "id, agent_name, request_type, identifier, comment, created_at, completed";

#[derive(Clone)]
pub struct RequestRepository {
    pool: SqlitePool,
}

impl RequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        agent_name: &str,
        request_type: RequestType,
        identifier: &str,
        comment: &str,
    ) -> Result<Request, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Request>(&format!(
            r#"
            INSERT INTO requests (agent_name, request_type, identifier, comment, created_at, completed)
            VALUES (?, ?, ?, ?, ?, 0)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(agent_name)
        .bind(request_type)
        .bind(identifier)
        .bind(comment)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn list_all(&self) -> Result<Vec<Request>, AppError> {
        let requests = sqlx::query_as::<_, Request>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    // instr() evita que '%' e '_' da busca virem curingas do LIKE
    pub async fn search(&self, query: &str) -> Result<Vec<Request>, AppError> {
        let requests = sqlx::query_as::<_, Request>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS} FROM requests
            WHERE instr(lower(agent_name), lower(?1)) > 0
               OR instr(lower(identifier), lower(?1)) > 0
               OR instr(lower(comment), lower(?1)) > 0
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn created_after(&self, since: DateTime<Utc>) -> Result<Vec<Request>, AppError> {
        let requests = sqlx::query_as::<_, Request>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests WHERE created_at > ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    // Gravar o mesmo valor não muda nada na linha
    pub async fn set_completed<'e, E>(
        &self,
        executor: E,
        id: i64,
        completed: bool,
    ) -> Result<Option<Request>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Request>(&format!(
            "UPDATE requests SET completed = ? WHERE id = ? RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(completed)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn clear_all<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM requests").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
