// src/models/chat.rs

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Quantidade máxima de mensagens devolvidas na listagem do chat.
pub const CHAT_HISTORY_LIMIT: i64 = 50;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("regex de menção inválida"));

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    #[schema(example = "maria")]
    pub sender: String,
    #[schema(example = "@joao pode cobrir meu intervalo?")]
    pub body: String,
    #[sqlx(json)]
    pub mentions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// A mensagem é "para" o usuário quando o nome aparece literalmente
    /// entre as menções extraídas.
    pub fn mentions_user(&self, username: &str) -> bool {
        self.mentions.iter().any(|m| m == username)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendMessagePayload {
    #[validate(length(min = 1, message = "A mensagem não pode ser vazia."))]
    #[schema(example = "@joao pode cobrir meu intervalo?")]
    pub body: String,
}

/// Extrai os nomes citados com `@nome`, sem repetição e na ordem em que
/// aparecem. Não verifica se o usuário existe.
pub fn extract_mentions(body: &str) -> Vec<String> {
    let mut mentions: Vec<String> = Vec::new();
    for cap in MENTION_RE.captures_iter(body) {
        let name = &cap[1];
        if !mentions.iter().any(|m| m == name) {
            mentions.push(name.to_string());
        }
    }
    mentions
}
