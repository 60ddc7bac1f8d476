// src/services/chat_service.rs

use sqlx::SqlitePool;

use crate::{
    common::{db_utils::begin_unlocked, error::AppError},
    db::ChatRepository,
    models::{
        auth::Identity,
        chat::{extract_mentions, ChatMessage},
    },
};

#[derive(Clone)]
pub struct ChatService {
    repo: ChatRepository,
    pool: SqlitePool,
}

impl ChatService {
    pub fn new(repo: ChatRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    pub async fn send(&self, identity: &Identity, body: &str) -> Result<ChatMessage, AppError> {
        let body = body.trim();
        let mentions = extract_mentions(body);

        let mut tx = begin_unlocked(&self.pool).await?;
        let message = self.repo.create(&mut *tx, &identity.username, body, &mentions).await?;
        tx.commit().await?;

        tracing::debug!("💬 '{}' enviou a mensagem #{} (menções: {:?}).", identity.username, message.id, mentions);
        Ok(message)
    }

    pub async fn list_recent(&self) -> Result<Vec<ChatMessage>, AppError> {
        self.repo.list_recent().await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ChatMessage>, AppError> {
        self.repo.search(query.trim()).await
    }

    /// Mensagens que citam quem consulta com `@usuario`.
    pub async fn mentions_for(&self, identity: &Identity) -> Result<Vec<ChatMessage>, AppError> {
        self.repo.mentioning(&identity.username).await
    }

    pub async fn clear_all(&self, identity: &Identity) -> Result<u64, AppError> {
        identity.require_admin()?;

        let mut tx = begin_unlocked(&self.pool).await?;
        let removed = self.repo.clear_all(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!("🧹 '{}' apagou {} mensagens do chat.", identity.username, removed);
        Ok(removed)
    }
}
