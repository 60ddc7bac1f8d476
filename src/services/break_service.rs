// src/services/break_service.rs

use chrono::NaiveDate;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::{db_utils::begin_unlocked, error::AppError},
    db::{BreakRepository, TemplateRepository},
    models::{
        auth::{Identity, Shift, Team},
        breaks::{normalize_time, BreakBooking, BreakSlot, BreakTemplate, SlotDefinition, SlotUsage},
    },
};

#[derive(Clone)]
pub struct BreakService {
    break_repo: BreakRepository,
    template_repo: TemplateRepository,
    pool: SqlitePool,
}

/// Valida a definição e normaliza nome e horários antes de gravar.
fn prepare_definition(def: &SlotDefinition) -> Result<SlotDefinition, AppError> {
    def.validate()?;

    let name = def.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("O nome do intervalo é obrigatório.".into()));
    }

    Ok(SlotDefinition {
        name: name.to_string(),
        start_time: normalize_time(&def.start_time)?,
        end_time: normalize_time(&def.end_time)?,
        max_capacity: def.max_capacity,
        team: def.team,
        shift: def.shift,
    })
}

impl BreakService {
    pub fn new(break_repo: BreakRepository, template_repo: TemplateRepository, pool: SqlitePool) -> Self {
        Self {
            break_repo,
            template_repo,
            pool,
        }
    }

    // =========================================================================
    //  INTERVALOS (ADMIN)
    // =========================================================================

    pub async fn create_slot(&self, identity: &Identity, def: &SlotDefinition) -> Result<BreakSlot, AppError> {
        identity.require_admin()?;
        let def = prepare_definition(def)?;

        let mut tx = begin_unlocked(&self.pool).await?;
        let slot = self
            .break_repo
            .insert_slot(&mut *tx, &def, &identity.username, None, None)
            .await?;
        tx.commit().await?;

        tracing::info!(
            "☕ '{}' criou o intervalo '{}' ({}-{}, {} vagas, equipe={}, turno={}).",
            identity.username,
            slot.name,
            slot.start_time,
            slot.end_time,
            slot.max_capacity,
            slot.team,
            slot.shift
        );
        Ok(slot)
    }

    pub async fn update_slot(
        &self,
        identity: &Identity,
        id: i64,
        def: &SlotDefinition,
    ) -> Result<BreakSlot, AppError> {
        identity.require_admin()?;
        let def = prepare_definition(def)?;

        let mut tx = begin_unlocked(&self.pool).await?;
        let slot = self
            .break_repo
            .update_slot(&mut *tx, id, &def)
            .await?
            .ok_or(AppError::NotFound("Intervalo"))?;
        tx.commit().await?;

        tracing::info!("✏️ '{}' alterou o intervalo #{}.", identity.username, id);
        Ok(slot)
    }

    /// Remove o intervalo e todas as reservas dele, de qualquer data.
    pub async fn delete_slot(&self, identity: &Identity, id: i64) -> Result<(), AppError> {
        identity.require_admin()?;

        let mut tx = begin_unlocked(&self.pool).await?;
        if !self.break_repo.delete_slot(&mut *tx, id).await? {
            return Err(AppError::NotFound("Intervalo"));
        }
        tx.commit().await?;

        tracing::info!("🗑️ '{}' removeu o intervalo #{} e suas reservas.", identity.username, id);
        Ok(())
    }

    pub async fn list_slots(&self) -> Result<Vec<BreakSlot>, AppError> {
        self.break_repo.list_live().await
    }

    // =========================================================================
    //  DISPONIBILIDADE
    // =========================================================================

    /// Intervalos com vaga em `date` para a equipe/turno informados,
    /// ordenados pelo horário de início.
    pub async fn available_slots(
        &self,
        date: NaiveDate,
        team: Team,
        shift: Shift,
    ) -> Result<Vec<SlotUsage>, AppError> {
        let usage = self.break_repo.usage_on(date).await?;

        Ok(usage
            .into_iter()
            .filter(|u| u.slot.is_eligible(team, shift))
            .filter(|u| u.remaining > 0)
            .collect())
    }

    /// Visão do admin: todos os intervalos da data, inclusive os lotados.
    pub async fn slot_usage(&self, identity: &Identity, date: NaiveDate) -> Result<Vec<SlotUsage>, AppError> {
        identity.require_admin()?;
        self.break_repo.usage_on(date).await
    }

    // =========================================================================
    //  RESERVAS
    // =========================================================================

    /// Reserva atômica: a vaga é conferida no próprio INSERT, então duas
    /// reservas simultâneas nunca passam da capacidade.
    pub async fn book(&self, identity: &Identity, slot_id: i64, date: NaiveDate) -> Result<BreakBooking, AppError> {
        let mut tx = begin_unlocked(&self.pool).await?;

        let inserted = self
            .break_repo
            .insert_booking_if_available(&mut *tx, slot_id, identity.user_id, &identity.username, date)
            .await?;

        if let Some(booking) = inserted {
            tx.commit().await?;
            tracing::info!(
                "✅ '{}' reservou o intervalo #{} para {}.",
                identity.username,
                slot_id,
                date
            );
            return Ok(booking);
        }

        // Nada inserido: descobre o motivo na mesma transação
        if self.break_repo.find_bookable_slot(&mut *tx, slot_id, date).await?.is_none() {
            return Err(AppError::NotFound("Intervalo"));
        }
        if self
            .break_repo
            .user_has_booking(&mut *tx, slot_id, identity.user_id, date)
            .await?
        {
            return Err(AppError::AlreadyBooked);
        }

        tracing::warn!("🚫 Intervalo #{} lotado em {} (tentativa de '{}').", slot_id, date, identity.username);
        Err(AppError::SlotFull)
    }

    /// Cancela uma reserva própria. Admins podem cancelar qualquer uma.
    pub async fn cancel_booking(&self, identity: &Identity, booking_id: i64) -> Result<(), AppError> {
        let mut tx = begin_unlocked(&self.pool).await?;

        let booking = self
            .break_repo
            .find_booking(&mut *tx, booking_id)
            .await?
            .ok_or(AppError::NotFound("Reserva"))?;

        if booking.user_id != identity.user_id && !identity.is_admin() {
            return Err(AppError::Forbidden);
        }

        self.break_repo.delete_booking(&mut *tx, booking_id).await?;
        tx.commit().await?;

        tracing::info!(
            "↩️ '{}' cancelou a reserva #{} de '{}'.",
            identity.username,
            booking_id,
            booking.username
        );
        Ok(())
    }

    pub async fn my_bookings(&self, identity: &Identity) -> Result<Vec<BreakBooking>, AppError> {
        self.break_repo.bookings_for_user(identity.user_id).await
    }

    pub async fn bookings_on(&self, identity: &Identity, date: NaiveDate) -> Result<Vec<BreakBooking>, AppError> {
        identity.require_admin()?;
        self.break_repo.bookings_on(date).await
    }

    pub async fn clear_bookings(&self, identity: &Identity) -> Result<u64, AppError> {
        identity.require_admin()?;

        let mut tx = begin_unlocked(&self.pool).await?;
        let removed = self.break_repo.clear_bookings(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!("🧹 '{}' apagou {} reservas.", identity.username, removed);
        Ok(removed)
    }

    // =========================================================================
    //  TEMPLATES
    // =========================================================================

    /// Salva (ou sobrescreve) o template. As linhas de template antigas com o
    /// mesmo nome viram histórico e as definições novas são gravadas do zero.
    pub async fn save_template(
        &self,
        identity: &Identity,
        name: &str,
        definitions: &[SlotDefinition],
    ) -> Result<BreakTemplate, AppError> {
        identity.require_admin()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("O nome do template é obrigatório.".into()));
        }
        if definitions.is_empty() {
            return Err(AppError::InvalidInput("O template precisa de pelo menos um intervalo.".into()));
        }
        let definitions = definitions
            .iter()
            .map(prepare_definition)
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = begin_unlocked(&self.pool).await?;

        let template = self
            .template_repo
            .upsert(&mut *tx, name, &definitions, &identity.username)
            .await?;

        let retired = self.break_repo.retire_template_rows(&mut *tx, name).await?;

        for def in &definitions {
            self.break_repo
                .insert_slot(&mut *tx, def, &identity.username, Some(name), None)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "📋 '{}' salvou o template '{}' ({} intervalos, {} linhas antigas aposentadas).",
            identity.username,
            name,
            definitions.len(),
            retired
        );
        Ok(template)
    }

    /// Materializa o template em `date`: apaga os intervalos vivos agendados
    /// para essa data e cria um intervalo por definição.
    pub async fn apply_template(
        &self,
        identity: &Identity,
        name: &str,
        date: NaiveDate,
    ) -> Result<Vec<BreakSlot>, AppError> {
        identity.require_admin()?;

        let mut tx = begin_unlocked(&self.pool).await?;

        let template = self
            .template_repo
            .find_by_name(&mut *tx, name.trim())
            .await?
            .ok_or(AppError::NotFound("Template"))?;

        let removed = self.break_repo.delete_live_scheduled_on(&mut *tx, date).await?;

        let mut created = Vec::with_capacity(template.slots.len());
        for def in &template.slots {
            let slot = self
                .break_repo
                .insert_slot(&mut *tx, def, &identity.username, None, Some(date))
                .await?;
            created.push(slot);
        }

        tx.commit().await?;

        tracing::info!(
            "📅 '{}' aplicou o template '{}' em {} ({} intervalos criados, {} removidos).",
            identity.username,
            template.name,
            date,
            created.len(),
            removed
        );
        Ok(created)
    }

    pub async fn list_templates(&self) -> Result<Vec<BreakTemplate>, AppError> {
        self.template_repo.list_all().await
    }

    pub async fn template_rows(&self, name: &str) -> Result<Vec<BreakSlot>, AppError> {
        self.break_repo.list_template_rows(name.trim()).await
    }

    pub async fn delete_template(&self, identity: &Identity, name: &str) -> Result<(), AppError> {
        identity.require_admin()?;
        let name = name.trim();

        let mut tx = begin_unlocked(&self.pool).await?;
        if !self.template_repo.delete(&mut *tx, name).await? {
            return Err(AppError::NotFound("Template"));
        }
        self.break_repo.retire_template_rows(&mut *tx, name).await?;
        tx.commit().await?;

        tracing::info!("🗑️ '{}' removeu o template '{}'.", identity.username, name);
        Ok(())
    }
}
