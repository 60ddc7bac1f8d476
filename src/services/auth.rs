// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::SqlitePool;

use crate::{
    common::{db_utils::begin_unlocked, error::AppError},
    config::Config,
    db::UserRepository,
    models::auth::{AuthResponse, Claims, Identity, Role, Shift, Team, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    pool: SqlitePool,
    jwt_secret: String,
    bcrypt_cost: u32,
    token_ttl: chrono::Duration,
    bootstrap_username: String,
    bootstrap_password: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, pool: SqlitePool, config: &Config) -> Self {
        Self {
            user_repo,
            pool,
            jwt_secret: config.jwt_secret.clone(),
            bcrypt_cost: config.bcrypt_cost,
            token_ttl: chrono::Duration::hours(config.token_ttl_hours),
            bootstrap_username: config.bootstrap_admin_username.clone(),
            bootstrap_password: config.bootstrap_admin_password.clone(),
        }
    }

    // --- CREDENCIAIS ---

    /// Hash bcrypt, executado fora do runtime assíncrono.
    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        Ok(hashed)
    }

    async fn password_matches(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        let password_clone = password.to_owned();
        let password_hash_clone = password_hash.to_owned();

        // Executa a verificação em um thread separado
        let outcome = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?;

        // Hash corrompido no banco conta como senha errada, sem vazar o motivo
        Ok(outcome.unwrap_or_else(|e| {
            tracing::warn!("Hash de senha ilegível no banco: {}", e);
            false
        }))
    }

    /// Confere usuário e senha. Usuário inexistente e senha errada geram o
    /// mesmo `InvalidCredentials`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.password_matches(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(Identity::from(&user))
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<AuthResponse, AppError> {
        let identity = self.authenticate(username, password).await?;
        let token = self.create_token(identity.user_id)?;

        tracing::info!("🔑 Login de '{}' ({:?}).", identity.username, identity.role);
        Ok(AuthResponse { token, identity })
    }

    /// Decodifica o token e recarrega o usuário: contas removidas perdem o
    /// acesso e mudanças de perfil valem na hora.
    pub async fn validate_token(&self, token: &str) -> Result<Identity, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Ok(Identity::from(&user))
    }

    fn create_token(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    // --- ADMIN INICIAL ---

    /// Garante que o administrador inicial existe. Roda na inicialização,
    /// fora do killswitch.
    pub async fn ensure_bootstrap_admin(&self) -> Result<(), AppError> {
        if self.user_repo.find_by_username(&self.bootstrap_username).await?.is_some() {
            return Ok(());
        }

        if self.bootstrap_password == crate::config::DEFAULT_BOOTSTRAP_PASSWORD {
            tracing::warn!(
                "⚠️ Administrador '{}' criado com a senha padrão. Troque-a o quanto antes.",
                self.bootstrap_username
            );
        }

        let hashed = self.hash_password(&self.bootstrap_password).await?;
        self.user_repo
            .create_user(
                &self.pool,
                &self.bootstrap_username,
                &hashed,
                Role::Admin,
                Team::English,
                Shift::First,
            )
            .await?;

        tracing::info!("👤 Administrador inicial '{}' criado.", self.bootstrap_username);
        Ok(())
    }

    // --- GESTÃO DE USUÁRIOS (ADMIN) ---

    pub async fn list_users(&self, identity: &Identity) -> Result<Vec<User>, AppError> {
        identity.require_admin()?;
        self.user_repo.list_all().await
    }

    pub async fn create_user(
        &self,
        identity: &Identity,
        username: &str,
        password: &str,
        role: Role,
        team: Team,
        shift: Shift,
    ) -> Result<User, AppError> {
        identity.require_admin()?;

        // 1. Hashing (fora da transação, pois não toca no banco)
        let hashed_password = self.hash_password(password).await?;

        let mut tx = begin_unlocked(&self.pool).await?;
        let user = self
            .user_repo
            .create_user(&mut *tx, username.trim(), &hashed_password, role, team, shift)
            .await?;
        tx.commit().await?;

        tracing::info!("👤 '{}' criou o usuário '{}' ({:?}).", identity.username, user.username, role);
        Ok(user)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_user(
        &self,
        identity: &Identity,
        id: i64,
        username: Option<&str>,
        password: Option<&str>,
        role: Option<Role>,
        team: Option<Team>,
        shift: Option<Shift>,
    ) -> Result<User, AppError> {
        identity.require_admin()?;

        let hashed_password = match password {
            Some(p) => Some(self.hash_password(p).await?),
            None => None,
        };

        let mut tx = begin_unlocked(&self.pool).await?;

        let target = self
            .user_repo
            .fetch_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Usuário"))?;

        // O administrador inicial não pode ser renomeado nem rebaixado
        if target.username == self.bootstrap_username {
            let renamed = username.is_some_and(|u| u.trim() != target.username);
            let demoted = role.is_some_and(|r| r != Role::Admin);
            if renamed || demoted {
                return Err(AppError::Forbidden);
            }
        }

        let user = self
            .user_repo
            .update_user(
                &mut *tx,
                id,
                username.map(str::trim),
                hashed_password.as_deref(),
                role,
                team,
                shift,
            )
            .await?
            .ok_or(AppError::NotFound("Usuário"))?;
        tx.commit().await?;

        tracing::info!("✏️ '{}' atualizou o usuário '{}'.", identity.username, user.username);
        Ok(user)
    }

    pub async fn delete_user(&self, identity: &Identity, id: i64) -> Result<(), AppError> {
        identity.require_admin()?;

        let mut tx = begin_unlocked(&self.pool).await?;

        let target = self
            .user_repo
            .fetch_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Usuário"))?;

        if target.username == self.bootstrap_username {
            tracing::warn!("⛔ '{}' tentou remover o administrador inicial.", identity.username);
            return Err(AppError::Forbidden);
        }

        self.user_repo.delete_user(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!("🗑️ '{}' removeu o usuário '{}'.", identity.username, target.username);
        Ok(())
    }
}
