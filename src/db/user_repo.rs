use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::auth::{Role, Shift, Team, User},
};

const USER_COLUMNS: &str = "id, username, password_hash, role, team, shift, created_at";

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo nome
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.fetch_by_id(&self.pool, id).await
    }

    // Mesma busca, mas dentro da transação de quem chama
    pub async fn fetch_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    // Cria um novo usuário. Nome duplicado vira ConstraintViolation.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        username: &str,
        password_hash: &str,
        role: Role,
        team: Team,
        shift: Shift,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password_hash, role, team, shift, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(team)
        .bind(shift)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .map_err(AppError::from_write)
    }

    // Só altera o que vier preenchido (COALESCE mantém o valor atual)
    #[allow(clippy::too_many_arguments)]
    pub async fn update_user<'e, E>(
        &self,
        executor: E,
        id: i64,
        username: Option<&str>,
        password_hash: Option<&str>,
        role: Option<Role>,
        team: Option<Team>,
        shift: Option<Shift>,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET username      = COALESCE(?, username),
                password_hash = COALESCE(?, password_hash),
                role          = COALESCE(?, role),
                team          = COALESCE(?, team),
                shift         = COALESCE(?, shift)
            WHERE id = ?
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(team)
        .bind(shift)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from_write)
    }

    // As reservas do usuário não são removidas junto (referência fraca)
    pub async fn delete_user<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await
            .map_err(AppError::from_write)?;

        Ok(result.rows_affected() > 0)
    }
}
