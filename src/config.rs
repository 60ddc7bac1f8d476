// src/config.rs

use std::env;

use anyhow::Context;
use sqlx::SqlitePool;

use crate::{
    db::{
        self, BreakRepository, ChatRepository, ImageRepository, MistakeRepository, RequestRepository,
        SettingsRepository, TemplateRepository, UserRepository,
    },
    services::{
        auth::AuthService, break_service::BreakService, chat_service::ChatService,
        image_service::ImageService, mistake_service::MistakeService,
        notification_service::NotificationService, request_service::RequestService,
        settings_service::SettingsService,
    },
};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://desk.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_BOOTSTRAP_USERNAME: &str = "admin";
pub const DEFAULT_BOOTSTRAP_PASSWORD: &str = "admin123";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 12;

// Configuração lida do ambiente (.env incluso)
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub token_ttl_hours: i64,
    pub bootstrap_admin_username: String,
    pub bootstrap_admin_password: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw.parse().context("BCRYPT_COST deve ser um número")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };
        let token_ttl_hours = match env::var("TOKEN_TTL_HOURS") {
            Ok(raw) => raw.parse().context("TOKEN_TTL_HOURS deve ser um número")?,
            Err(_) => DEFAULT_TOKEN_TTL_HOURS,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            jwt_secret,
            bcrypt_cost,
            token_ttl_hours,
            bootstrap_admin_username: env::var("BOOTSTRAP_ADMIN_USERNAME")
                .unwrap_or_else(|_| DEFAULT_BOOTSTRAP_USERNAME.to_string()),
            bootstrap_admin_password: env::var("BOOTSTRAP_ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_BOOTSTRAP_PASSWORD.to_string()),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub auth_service: AuthService,
    pub settings_service: SettingsService,
    pub request_service: RequestService,
    pub mistake_service: MistakeService,
    pub chat_service: ChatService,
    pub image_service: ImageService,
    pub break_service: BreakService,
    pub notification_service: NotificationService,
}

impl AppState {
    /// Conecta, roda as migrações e garante o admin inicial.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = db::connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        db::migrate(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados")?;

        let state = Self::from_pool(db_pool, config);

        state
            .auth_service
            .ensure_bootstrap_admin()
            .await
            .context("Falha ao criar o administrador inicial")?;

        Ok(state)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: SqlitePool, config: &Config) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let request_repo = RequestRepository::new(db_pool.clone());
        let mistake_repo = MistakeRepository::new(db_pool.clone());
        let chat_repo = ChatRepository::new(db_pool.clone());
        let image_repo = ImageRepository::new(db_pool.clone());
        let break_repo = BreakRepository::new(db_pool.clone());
        let template_repo = TemplateRepository::new(db_pool.clone());

        Self {
            auth_service: AuthService::new(user_repo, db_pool.clone(), config),
            settings_service: SettingsService::new(settings_repo),
            request_service: RequestService::new(request_repo.clone(), db_pool.clone()),
            mistake_service: MistakeService::new(mistake_repo, db_pool.clone()),
            chat_service: ChatService::new(chat_repo.clone(), db_pool.clone()),
            image_service: ImageService::new(image_repo, db_pool.clone()),
            break_service: BreakService::new(break_repo, template_repo, db_pool.clone()),
            notification_service: NotificationService::new(request_repo, chat_repo),
            db_pool,
        }
    }
}
