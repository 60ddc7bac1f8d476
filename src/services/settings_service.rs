// src/services/settings_service.rs

use crate::{
    common::error::AppError,
    db::SettingsRepository,
    models::{auth::Identity, settings::SystemSettings},
};

/// O killswitch. A trava em si é aplicada por `begin_unlocked` em cada
/// escrita; aqui ficam só a consulta e a troca do estado.
#[derive(Clone)]
pub struct SettingsService {
    settings_repo: SettingsRepository,
}

impl SettingsService {
    pub fn new(settings_repo: SettingsRepository) -> Self {
        Self { settings_repo }
    }

    pub async fn get_settings(&self) -> Result<SystemSettings, AppError> {
        self.settings_repo.get_settings().await
    }

    pub async fn is_enabled(&self) -> Result<bool, AppError> {
        Ok(self.settings_repo.get_settings().await?.killswitch_enabled)
    }

    // Não passa pela trava, senão ninguém conseguiria destravar
    pub async fn toggle(&self, identity: &Identity, enabled: bool) -> Result<SystemSettings, AppError> {
        identity.require_admin()?;

        let settings = self.settings_repo.set_killswitch(enabled).await?;

        if enabled {
            tracing::warn!("🔒 Killswitch ATIVADO por '{}'.", identity.username);
        } else {
            tracing::info!("🔓 Killswitch desativado por '{}'.", identity.username);
        }
        Ok(settings)
    }
}
