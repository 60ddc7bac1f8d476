use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::settings::SystemSettings};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_settings(&self) -> Result<SystemSettings, AppError> {
        let settings = sqlx::query_as::<_, SystemSettings>(
            "SELECT id, killswitch_enabled, updated_at FROM system_settings WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Lê o killswitch usando o executor recebido (normalmente a transação
    /// da escrita que está para acontecer).
    pub async fn killswitch_enabled<'e, E>(executor: E) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        // Sem a linha, tratamos como bloqueado: não dá para saber o estado real
        let enabled: Option<bool> =
            sqlx::query_scalar("SELECT killswitch_enabled FROM system_settings WHERE id = 1")
                .fetch_optional(executor)
                .await?;

        Ok(enabled.unwrap_or(true))
    }

    // UPSERT: garante a linha única mesmo se alguém a apagou na mão
    pub async fn set_killswitch(&self, enabled: bool) -> Result<SystemSettings, AppError> {
        let settings = sqlx::query_as::<_, SystemSettings>(
            r#"
            INSERT INTO system_settings (id, killswitch_enabled, updated_at)
            VALUES (1, ?, ?)
            ON CONFLICT (id)
            DO UPDATE SET
                killswitch_enabled = excluded.killswitch_enabled,
                updated_at = excluded.updated_at
            RETURNING id, killswitch_enabled, updated_at
            "#,
        )
        .bind(enabled)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}
