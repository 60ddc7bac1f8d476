// src/db/chat_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{types::Json, Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::chat::{ChatMessage, CHAT_HISTORY_LIMIT},
};

const MESSAGE_COLUMNS: &str = "id, sender, body, mentions, created_at";

#[derive(Clone)]
pub struct ChatRepository {
    pool: SqlitePool,
}

impl ChatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        sender: &str,
        body: &str,
        mentions: &[String],
    ) -> Result<ChatMessage, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            INSERT INTO chat_messages (sender, body, mentions, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(sender)
        .bind(body)
        .bind(Json(mentions))
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .map_err(AppError::from_write)
    }

    // Só as últimas CHAT_HISTORY_LIMIT mensagens, mais recentes primeiro
    pub async fn list_recent(&self) -> Result<Vec<ChatMessage>, AppError> {
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages ORDER BY created_at DESC, id DESC LIMIT ?"
        ))
        .bind(CHAT_HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ChatMessage>, AppError> {
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM chat_messages
            WHERE instr(lower(sender), lower(?1)) > 0
               OR instr(lower(body), lower(?1)) > 0
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    // json_each percorre o array de menções gravado na mensagem
    pub async fn mentioning(&self, username: &str) -> Result<Vec<ChatMessage>, AppError> {
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM chat_messages
            WHERE EXISTS (SELECT 1 FROM json_each(chat_messages.mentions) WHERE json_each.value = ?)
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#
        ))
        .bind(username)
        .bind(CHAT_HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn created_after(&self, since: DateTime<Utc>) -> Result<Vec<ChatMessage>, AppError> {
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages WHERE created_at > ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn clear_all<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM chat_messages").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
