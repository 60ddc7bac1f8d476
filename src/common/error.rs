use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    // Usuário inexistente e senha errada caem aqui, sem distinção.
    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso restrito a administradores")]
    Forbidden,

    #[error("Sistema bloqueado (killswitch ativo)")]
    SystemLocked,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    // Unicidade, chave estrangeira ou CHECK do banco
    #[error("Escrita rejeitada por uma restrição do banco")]
    ConstraintViolation,

    #[error("Intervalo sem vagas para a data")]
    SlotFull,

    #[error("Usuário já reservou este intervalo nesta data")]
    AlreadyBooked,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Converte falhas de escrita: violações de restrição viram
    /// `ConstraintViolation`, o resto continua como erro de banco.
    pub fn from_write(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation()
                || db_err.is_foreign_key_violation()
                || db_err.is_check_violation()
            {
                return AppError::ConstraintViolation;
            }
        }
        AppError::DatabaseError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidInput(ref msg) => {
                let body = Json(json!({ "error": msg }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos."),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente."),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Esta ação é restrita a administradores."),
            AppError::SystemLocked => (StatusCode::LOCKED, "Sistema bloqueado. Nenhuma alteração é permitida no momento."),
            AppError::NotFound(entity) => {
                let body = Json(json!({ "error": format!("{} não encontrado.", entity) }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }
            AppError::ConstraintViolation => (StatusCode::CONFLICT, "Não foi possível salvar os dados."),
            AppError::SlotFull => (StatusCode::CONFLICT, "Este intervalo já está lotado para a data escolhida."),
            AppError::AlreadyBooked => (StatusCode::CONFLICT, "Você já reservou este intervalo nesta data."),

            // Todos os outros erros viram 500. O `tracing` loga a mensagem detalhada.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
