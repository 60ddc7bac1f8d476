use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::{common::error::AppError, db::SettingsRepository};

// ---
// Helper do killswitch: a "trava" de todas as escritas
// ---
/// Abre uma transação de escrita e lê o killswitch dentro dela. Com o sistema
/// bloqueado, devolve `SystemLocked` e a transação é descartada sem efeito.
///
/// `BEGIN IMMEDIATE` pega a trava de escrita já na abertura: escritores
/// concorrentes esperam o `busy_timeout` em vez de falhar ao promover a
/// trava de leitura.
pub(crate) async fn begin_unlocked(
    pool: &SqlitePool,
) -> Result<Transaction<'static, Sqlite>, AppError> {
    // O operador '?' converte automaticamente sqlx::Error -> AppError::DatabaseError
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    if SettingsRepository::killswitch_enabled(&mut *tx).await? {
        tracing::warn!("🔒 Escrita recusada: killswitch ativo.");
        return Err(AppError::SystemLocked);
    }

    Ok(tx)
}
