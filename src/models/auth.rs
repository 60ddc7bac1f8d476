// src/models/auth.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::error::AppError;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Agent,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Team {
    English,
    Spanish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    First,
    Second,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Team::English => "english",
            Team::Spanish => "spanish",
        })
    }
}

impl FromStr for Team {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english" => Ok(Team::English),
            "spanish" => Ok(Team::Spanish),
            other => Err(format!("equipe desconhecida: '{}'", other)),
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shift::First => "first",
            Shift::Second => "second",
        })
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Shift::First),
            "second" => Ok(Shift::Second),
            other => Err(format!("turno desconhecido: '{}'", other)),
        }
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub role: Role,
    pub team: Team,
    pub shift: Shift,
    pub created_at: DateTime<Utc>,
}

/// Identidade de quem está chamando. Estabelecida no login e repassada
/// explicitamente para cada operação dos serviços.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub team: Team,
    pub shift: Shift,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::warn!("⛔ '{}' tentou uma ação de administrador.", self.username);
            Err(AppError::Forbidden)
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            team: user.team,
            shift: user.shift,
        }
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "O usuário é obrigatório."))]
    #[schema(example = "maria")]
    pub username: String,
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub identity: Identity,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "O usuário é obrigatório."))]
    #[schema(example = "joao")]
    pub username: String,
    pub password: String,
    pub role: Role,
    pub team: Team,
    pub shift: Shift,
}

// Todos os campos são opcionais: só o que vier é alterado
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "O usuário não pode ser vazio."))]
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub team: Option<Team>,
    pub shift: Option<Shift>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,   // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: 1,
            username: "ana".into(),
            role,
            team: Team::English,
            shift: Shift::First,
        }
    }

    #[test]
    fn only_admins_pass_the_admin_check() {
        assert!(identity(Role::Admin).require_admin().is_ok());
        assert!(matches!(
            identity(Role::Agent).require_admin(),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn team_and_shift_round_trip_through_text() {
        assert_eq!("spanish".parse::<Team>().unwrap(), Team::Spanish);
        assert_eq!(Shift::Second.to_string(), "second");
        assert!("all".parse::<Team>().is_err());
    }
}
