// src/services/mistake_service.rs

use sqlx::SqlitePool;

use crate::{
    common::{db_utils::begin_unlocked, error::AppError},
    db::MistakeRepository,
    models::{auth::Identity, mistakes::Mistake},
};

#[derive(Clone)]
pub struct MistakeService {
    repo: MistakeRepository,
    pool: SqlitePool,
}

impl MistakeService {
    pub fn new(repo: MistakeRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    // Quem registra fica como líder responsável
    pub async fn add(
        &self,
        identity: &Identity,
        agent_name: &str,
        ticket_id: &str,
        error_description: &str,
    ) -> Result<Mistake, AppError> {
        let mut tx = begin_unlocked(&self.pool).await?;
        let mistake = self
            .repo
            .create(
                &mut *tx,
                &identity.username,
                agent_name.trim(),
                ticket_id.trim(),
                error_description.trim(),
            )
            .await?;
        tx.commit().await?;

        tracing::info!(
            "📝 '{}' registrou um erro de '{}' no ticket {}.",
            identity.username,
            mistake.agent_name,
            mistake.ticket_id
        );
        Ok(mistake)
    }

    pub async fn list_all(&self) -> Result<Vec<Mistake>, AppError> {
        self.repo.list_all().await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Mistake>, AppError> {
        self.repo.search(query.trim()).await
    }

    pub async fn clear_all(&self, identity: &Identity) -> Result<u64, AppError> {
        identity.require_admin()?;

        let mut tx = begin_unlocked(&self.pool).await?;
        let removed = self.repo.clear_all(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!("🧹 '{}' apagou {} erros registrados.", identity.username, removed);
        Ok(removed)
    }
}
