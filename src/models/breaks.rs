// src/models/breaks.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    models::auth::{Shift, Team},
};

// --- Elegibilidade (equipe / turno) ---

/// Filtro de elegibilidade de um intervalo. `Any` ("all" no banco e no JSON)
/// aceita qualquer valor; `Only` exige igualdade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<T> {
    Any,
    Only(T),
}

impl<T: PartialEq> Scope<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Scope::Any => true,
            Scope::Only(expected) => expected == value,
        }
    }
}

impl<T> Default for Scope<T> {
    fn default() -> Self {
        Scope::Any
    }
}

const ANY_LITERAL: &str = "all";

#[derive(Debug, Error)]
#[error("valor de elegibilidade inválido: {0}")]
pub struct ParseScopeError(String);

impl<T: fmt::Display> fmt::Display for Scope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Any => f.write_str(ANY_LITERAL),
            Scope::Only(value) => value.fmt(f),
        }
    }
}

impl<T> FromStr for Scope<T>
where
    T: FromStr<Err = String>,
{
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ANY_LITERAL {
            return Ok(Scope::Any);
        }
        s.parse::<T>().map(Scope::Only).map_err(ParseScopeError)
    }
}

// Usado pelo `#[sqlx(try_from = "String")]` das colunas team/shift
impl<T> TryFrom<String> for Scope<T>
where
    T: FromStr<Err = String>,
{
    type Error = ParseScopeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl<T: fmt::Display> Serialize for Scope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Scope<T>
where
    T: FromStr<Err = String>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// --- Horários ---

/// Aceita "HH:MM" (ou "HH:MM:SS") e devolve sempre "HH:MM", que ordena
/// corretamente como texto.
pub fn normalize_time(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| AppError::InvalidInput(format!("Horário inválido: '{}' (use HH:MM)", raw)))?;
    Ok(parsed.format("%H:%M").to_string())
}

// --- Entidades ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreakSlot {
    pub id: i64,
    #[schema(example = "Lunch")]
    pub name: String,
    #[schema(example = "12:00")]
    pub start_time: String,
    #[schema(example = "12:30")]
    pub end_time: String,
    #[schema(example = 2)]
    pub max_capacity: i64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    #[schema(value_type = String, example = "all")]
    pub shift: Scope<Shift>,
    #[sqlx(try_from = "String")]
    #[schema(value_type = String, example = "english")]
    pub team: Scope<Team>,
    pub is_template: bool,
    pub template_name: Option<String>,
    /// Data para a qual o intervalo foi materializado por um template.
    /// `None` = oferecido em qualquer data.
    pub schedule_date: Option<NaiveDate>,
    /// Preenchido quando uma linha de template é rebaixada a histórico.
    pub retired_at: Option<DateTime<Utc>>,
}

impl BreakSlot {
    pub fn is_eligible(&self, team: Team, shift: Shift) -> bool {
        self.team.matches(&team) && self.shift.matches(&shift)
    }
}

// Intervalo + ocupação em uma data específica
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotUsage {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub slot: BreakSlot,
    pub booked: i64,
    pub remaining: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreakBooking {
    pub id: i64,
    pub break_slot_id: i64,
    pub user_id: i64,
    pub username: String,
    #[schema(example = "2024-01-10")]
    pub booking_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Definição de intervalo dentro de um template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotDefinition {
    #[validate(length(min = 1, message = "O nome do intervalo é obrigatório."))]
    #[schema(example = "Lunch")]
    pub name: String,
    #[schema(example = "12:00")]
    pub start_time: String,
    #[schema(example = "12:30")]
    pub end_time: String,
    #[validate(range(min = 1, message = "A capacidade deve ser pelo menos 1."))]
    #[schema(example = 2)]
    pub max_capacity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "all")]
    pub team: Option<Scope<Team>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "all")]
    pub shift: Option<Scope<Shift>>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreakTemplate {
    pub id: i64,
    #[schema(example = "Standard")]
    pub name: String,
    #[sqlx(json)]
    pub slots: Vec<SlotDefinition>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

// --- Payloads / consultas ---

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateQuery {
    /// Data no formato YYYY-MM-DD.
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotPayload {
    pub break_slot_id: i64,
    #[schema(example = "2024-01-10")]
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveTemplatePayload {
    #[schema(example = "Standard")]
    pub name: String,
    pub slots: Vec<SlotDefinition>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyTemplatePayload {
    #[schema(example = "2024-02-01")]
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_scope_matches_every_value() {
        let scope: Scope<Team> = Scope::Any;
        assert!(scope.matches(&Team::English));
        assert!(scope.matches(&Team::Spanish));
    }

    #[test]
    fn specific_scope_requires_equality() {
        let scope = Scope::Only(Shift::Second);
        assert!(scope.matches(&Shift::Second));
        assert!(!scope.matches(&Shift::First));
    }

    #[test]
    fn scope_text_form_uses_all_for_wildcard() {
        assert_eq!(Scope::<Team>::Any.to_string(), "all");
        assert_eq!(Scope::Only(Team::Spanish).to_string(), "spanish");
        assert_eq!("all".parse::<Scope<Shift>>().unwrap(), Scope::Any);
        assert_eq!("first".parse::<Scope<Shift>>().unwrap(), Scope::Only(Shift::First));
        assert!("night".parse::<Scope<Shift>>().is_err());
    }

    #[test]
    fn slot_definition_defaults_scopes_to_none() {
        let def: SlotDefinition = serde_json::from_str(
            r#"{"name":"Lunch","startTime":"12:00","endTime":"12:30","maxCapacity":2}"#,
        )
        .unwrap();
        assert_eq!(def.team, None);
        assert_eq!(def.shift, None);

        let def: SlotDefinition = serde_json::from_str(
            r#"{"name":"Late","startTime":"18:00","endTime":"18:15","maxCapacity":1,"team":"spanish","shift":"all"}"#,
        )
        .unwrap();
        assert_eq!(def.team, Some(Scope::Only(Team::Spanish)));
        assert_eq!(def.shift, Some(Scope::Any));
    }

    #[test]
    fn times_are_normalized_to_hours_and_minutes() {
        assert_eq!(normalize_time("9:05").unwrap(), "09:05");
        assert_eq!(normalize_time("12:30:00").unwrap(), "12:30");
        assert!(matches!(normalize_time("lunch"), Err(AppError::InvalidInput(_))));
    }
}
