pub mod user_repo;
pub use user_repo::UserRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod request_repo;
pub use request_repo::RequestRepository;
pub mod mistake_repo;
pub use mistake_repo::MistakeRepository;
pub mod chat_repo;
pub use chat_repo::ChatRepository;
pub mod image_repo;
pub use image_repo::ImageRepository;
pub mod break_repo;
pub use break_repo::BreakRepository;
pub mod template_repo;
pub use template_repo::TemplateRepository;

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

/// Quanto uma escrita espera pela trava do arquivo antes de desistir.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Abre a pool do SQLite. Bancos em memória ficam com uma única conexão
/// (cada conexão nova seria um banco vazio diferente).
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);
    // WAL: leituras não bloqueiam a escrita em andamento
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .acquire_timeout(BUSY_TIMEOUT * 2)
        .idle_timeout(if in_memory { None } else { Some(Duration::from_secs(600)) })
        .max_lifetime(if in_memory { None } else { Some(Duration::from_secs(1800)) })
        .connect_with(options)
        .await?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}

/// Cria/atualiza o schema. Roda a cada inicialização.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
    Ok(())
}
