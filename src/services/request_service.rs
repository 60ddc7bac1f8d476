// src/services/request_service.rs

use sqlx::SqlitePool;

use crate::{
    common::{db_utils::begin_unlocked, error::AppError},
    db::RequestRepository,
    models::{
        auth::Identity,
        requests::{Request, RequestType},
    },
};

#[derive(Clone)]
pub struct RequestService {
    repo: RequestRepository,
    pool: SqlitePool,
}

impl RequestService {
    pub fn new(repo: RequestRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    // O agente é sempre quem está logado
    pub async fn add(
        &self,
        identity: &Identity,
        request_type: RequestType,
        identifier: &str,
        comment: &str,
    ) -> Result<Request, AppError> {
        let mut tx = begin_unlocked(&self.pool).await?;
        let request = self
            .repo
            .create(&mut *tx, &identity.username, request_type, identifier.trim(), comment.trim())
            .await?;
        tx.commit().await?;

        tracing::info!("📨 '{}' registrou a solicitação #{} ({:?}).", identity.username, request.id, request_type);
        Ok(request)
    }

    pub async fn list_all(&self) -> Result<Vec<Request>, AppError> {
        self.repo.list_all().await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Request>, AppError> {
        self.repo.search(query.trim()).await
    }

    pub async fn set_completed(
        &self,
        identity: &Identity,
        id: i64,
        completed: bool,
    ) -> Result<Request, AppError> {
        let mut tx = begin_unlocked(&self.pool).await?;
        let request = self
            .repo
            .set_completed(&mut *tx, id, completed)
            .await?
            .ok_or(AppError::NotFound("Solicitação"))?;
        tx.commit().await?;

        tracing::debug!("'{}' marcou a solicitação #{} como completed={}.", identity.username, id, completed);
        Ok(request)
    }

    pub async fn clear_all(&self, identity: &Identity) -> Result<u64, AppError> {
        identity.require_admin()?;

        let mut tx = begin_unlocked(&self.pool).await?;
        let removed = self.repo.clear_all(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!("🧹 '{}' apagou {} solicitações.", identity.username, removed);
        Ok(removed)
    }
}
