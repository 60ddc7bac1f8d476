// src/services/notification_service.rs

use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    db::{ChatRepository, RequestRepository},
    models::{auth::Identity, notifications::NotificationFeed},
};

/// Feed de novidades por consulta: nada de contadores guardados em memória,
/// o cliente informa a partir de quando quer saber.
#[derive(Clone)]
pub struct NotificationService {
    request_repo: RequestRepository,
    chat_repo: ChatRepository,
}

impl NotificationService {
    pub fn new(request_repo: RequestRepository, chat_repo: ChatRepository) -> Self {
        Self { request_repo, chat_repo }
    }

    pub async fn since(&self, identity: &Identity, since: DateTime<Utc>) -> Result<NotificationFeed, AppError> {
        let new_requests = self.request_repo.created_after(since).await?;
        let new_messages = self.chat_repo.created_after(since).await?;

        let mentions = new_messages
            .iter()
            .filter(|m| m.mentions_user(&identity.username))
            .cloned()
            .collect();

        Ok(NotificationFeed {
            since,
            new_requests,
            new_messages,
            mentions,
        })
    }
}
