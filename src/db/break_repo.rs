// src/db/break_repo.rs

use chrono::{NaiveDate, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::breaks::{BreakBooking, BreakSlot, SlotDefinition, SlotUsage},
};

const SLOT_COLUMNS: &str = "id, name, start_time, end_time, max_capacity, created_by, created_at, \
     shift, team, is_template, template_name, schedule_date, retired_at";

const BOOKING_COLUMNS: &str = "id, break_slot_id, user_id, username, booking_date, created_at";

// Intervalo "vivo": não é linha de template nem foi aposentado
const LIVE_FILTER: &str = "is_template = 0 AND retired_at IS NULL";

#[derive(Clone)]
pub struct BreakRepository {
    pool: SqlitePool,
}

impl BreakRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  INTERVALOS
    // =========================================================================

    /// Insere um intervalo a partir de uma definição já validada
    /// (horários normalizados). Equipe/turno ausentes viram "all".
    pub async fn insert_slot<'e, E>(
        &self,
        executor: E,
        def: &SlotDefinition,
        created_by: &str,
        template_name: Option<&str>,
        schedule_date: Option<NaiveDate>,
    ) -> Result<BreakSlot, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, BreakSlot>(&format!(
            r#"
            INSERT INTO break_slots (
                name, start_time, end_time, max_capacity, created_by, created_at,
                shift, team, is_template, template_name, schedule_date
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {SLOT_COLUMNS}
            "#
        ))
        .bind(&def.name)
        .bind(&def.start_time)
        .bind(&def.end_time)
        .bind(def.max_capacity)
        .bind(created_by)
        .bind(Utc::now())
        .bind(def.shift.unwrap_or_default().to_string())
        .bind(def.team.unwrap_or_default().to_string())
        .bind(template_name.is_some())
        .bind(template_name)
        .bind(schedule_date)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn update_slot<'e, E>(
        &self,
        executor: E,
        id: i64,
        def: &SlotDefinition,
    ) -> Result<Option<BreakSlot>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, BreakSlot>(&format!(
            r#"
            UPDATE break_slots
            SET name = ?, start_time = ?, end_time = ?, max_capacity = ?, shift = ?, team = ?
            WHERE id = ? AND {LIVE_FILTER}
            RETURNING {SLOT_COLUMNS}
            "#
        ))
        .bind(&def.name)
        .bind(&def.start_time)
        .bind(&def.end_time)
        .bind(def.max_capacity)
        .bind(def.shift.unwrap_or_default().to_string())
        .bind(def.team.unwrap_or_default().to_string())
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from_write)
    }

    /// Intervalo vivo que pode ser reservado em `date`.
    pub async fn find_bookable_slot<'e, E>(
        &self,
        executor: E,
        id: i64,
        date: NaiveDate,
    ) -> Result<Option<BreakSlot>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let slot = sqlx::query_as::<_, BreakSlot>(&format!(
            r#"
            SELECT {SLOT_COLUMNS} FROM break_slots
            WHERE id = ? AND {LIVE_FILTER} AND (schedule_date IS NULL OR schedule_date = ?)
            "#
        ))
        .bind(id)
        .bind(date)
        .fetch_optional(executor)
        .await?;

        Ok(slot)
    }

    pub async fn list_live(&self) -> Result<Vec<BreakSlot>, AppError> {
        let slots = sqlx::query_as::<_, BreakSlot>(&format!(
            "SELECT {SLOT_COLUMNS} FROM break_slots WHERE {LIVE_FILTER} ORDER BY start_time ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    pub async fn list_template_rows(&self, template_name: &str) -> Result<Vec<BreakSlot>, AppError> {
        let slots = sqlx::query_as::<_, BreakSlot>(&format!(
            r#"
            SELECT {SLOT_COLUMNS} FROM break_slots
            WHERE is_template = 1 AND template_name = ?
            ORDER BY start_time ASC, id ASC
            "#
        ))
        .bind(template_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    /// Intervalos vivos oferecidos em `date`, com a ocupação da data.
    /// Os filtros de equipe/turno são aplicados no serviço.
    pub async fn usage_on(&self, date: NaiveDate) -> Result<Vec<SlotUsage>, AppError> {
        let usage = sqlx::query_as::<_, SlotUsage>(
            r#"
            SELECT
                s.id, s.name, s.start_time, s.end_time, s.max_capacity, s.created_by, s.created_at,
                s.shift, s.team, s.is_template, s.template_name, s.schedule_date, s.retired_at,
                COUNT(b.id) AS booked,
                s.max_capacity - COUNT(b.id) AS remaining
            FROM break_slots s
            LEFT JOIN break_bookings b
                   ON b.break_slot_id = s.id AND b.booking_date = ?1
            WHERE s.is_template = 0
              AND s.retired_at IS NULL
              AND (s.schedule_date IS NULL OR s.schedule_date = ?1)
            GROUP BY s.id
            ORDER BY s.start_time ASC, s.id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(usage)
    }

    // Remove as reservas explicitamente antes do intervalo (não dependemos só do CASCADE)
    pub async fn delete_slot(&self, conn: &mut sqlx::SqliteConnection, id: i64) -> Result<bool, AppError> {
        sqlx::query("DELETE FROM break_bookings WHERE break_slot_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let result = sqlx::query("DELETE FROM break_slots WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Apaga os intervalos vivos agendados para `date` (e as reservas deles).
    pub async fn delete_live_scheduled_on(
        &self,
        conn: &mut sqlx::SqliteConnection,
        date: NaiveDate,
    ) -> Result<u64, AppError> {
        sqlx::query(&format!(
            r#"
            DELETE FROM break_bookings
            WHERE break_slot_id IN (
                SELECT id FROM break_slots WHERE {LIVE_FILTER} AND schedule_date = ?
            )
            "#
        ))
        .bind(date)
        .execute(&mut *conn)
        .await?;

        let result = sqlx::query(&format!(
            "DELETE FROM break_slots WHERE {LIVE_FILTER} AND schedule_date = ?"
        ))
        .bind(date)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Rebaixa as linhas de template com esse nome a histórico.
    pub async fn retire_template_rows<'e, E>(
        &self,
        executor: E,
        template_name: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE break_slots
            SET is_template = 0, retired_at = ?
            WHERE is_template = 1 AND template_name = ?
            "#,
        )
        .bind(Utc::now())
        .bind(template_name)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  RESERVAS
    // =========================================================================

    /// Reserva com checagem de capacidade no mesmo comando: o INSERT só
    /// acontece se ainda houver vaga e se o usuário não tiver reservado esse
    /// intervalo nessa data. `None` = nada foi inserido.
    pub async fn insert_booking_if_available<'e, E>(
        &self,
        executor: E,
        slot_id: i64,
        user_id: i64,
        username: &str,
        date: NaiveDate,
    ) -> Result<Option<BreakBooking>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, BreakBooking>(&format!(
            r#"
            INSERT INTO break_bookings (break_slot_id, user_id, username, booking_date, created_at)
            SELECT s.id, ?2, ?3, ?4, ?5
            FROM break_slots s
            WHERE s.id = ?1
              AND s.is_template = 0
              AND s.retired_at IS NULL
              AND (s.schedule_date IS NULL OR s.schedule_date = ?4)
              AND (
                  SELECT COUNT(*) FROM break_bookings b
                  WHERE b.break_slot_id = s.id AND b.booking_date = ?4
              ) < s.max_capacity
              AND NOT EXISTS (
                  SELECT 1 FROM break_bookings b
                  WHERE b.break_slot_id = s.id AND b.booking_date = ?4 AND b.user_id = ?2
              )
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(slot_id)
        .bind(user_id)
        .bind(username)
        .bind(date)
        .bind(Utc::now())
        .fetch_optional(executor)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn user_has_booking<'e, E>(
        &self,
        executor: E,
        slot_id: i64,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM break_bookings
                WHERE break_slot_id = ? AND user_id = ? AND booking_date = ?
            )
            "#,
        )
        .bind(slot_id)
        .bind(user_id)
        .bind(date)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    pub async fn find_booking<'e, E>(&self, executor: E, id: i64) -> Result<Option<BreakBooking>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let booking = sqlx::query_as::<_, BreakBooking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM break_bookings WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(booking)
    }

    pub async fn delete_booking<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM break_bookings WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn bookings_for_user(&self, user_id: i64) -> Result<Vec<BreakBooking>, AppError> {
        let bookings = sqlx::query_as::<_, BreakBooking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS} FROM break_bookings
            WHERE user_id = ?
            ORDER BY booking_date DESC, id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn bookings_on(&self, date: NaiveDate) -> Result<Vec<BreakBooking>, AppError> {
        let bookings = sqlx::query_as::<_, BreakBooking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS} FROM break_bookings
            WHERE booking_date = ?
            ORDER BY break_slot_id ASC, id ASC
            "#
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn clear_bookings<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM break_bookings").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
