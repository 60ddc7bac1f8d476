mod common;

use agent_desk::{
    common::error::AppError,
    models::{
        auth::{Role, Shift, Team},
        requests::RequestType,
    },
};
use common::{admin, agent, date, lock, setup, slot};

fn assert_locked<T: std::fmt::Debug>(result: Result<T, AppError>) {
    assert!(
        matches!(result, Err(AppError::SystemLocked)),
        "esperava SystemLocked, veio {:?}",
        result
    );
}

#[tokio::test]
async fn every_write_is_rejected_while_locked() {
    let state = setup().await;
    let admin = admin(&state).await;
    let ana = agent(&state, &admin, "ana", Team::English, Shift::First).await;
    let lunch = state
        .break_service
        .create_slot(&admin, &slot("Lunch", "12:00", "12:30", 2))
        .await
        .unwrap();
    let request = state
        .request_service
        .add(&ana, RequestType::Email, "cliente@exemplo.com", "")
        .await
        .unwrap();
    state
        .break_service
        .save_template(&admin, "Standard", &[slot("Morning", "10:00", "10:15", 3)])
        .await
        .unwrap();

    lock(&state, &admin).await;

    assert_locked(state.request_service.add(&ana, RequestType::Phone, "555-0101", "").await);
    assert_locked(state.request_service.set_completed(&ana, request.id, true).await);
    assert_locked(state.request_service.clear_all(&admin).await);
    assert_locked(state.mistake_service.add(&admin, "ana", "TCK-1", "sem retorno").await);
    assert_locked(state.chat_service.send(&ana, "@admin oi").await);
    assert_locked(state.image_service.upload(&admin, "aGVsbG8=").await);
    assert_locked(
        state
            .auth_service
            .create_user(&admin, "bia", "x", Role::Agent, Team::English, Shift::First)
            .await,
    );
    assert_locked(state.auth_service.delete_user(&admin, ana.user_id).await);
    assert_locked(state.break_service.create_slot(&admin, &slot("Late", "18:00", "18:15", 1)).await);
    assert_locked(state.break_service.delete_slot(&admin, lunch.id).await);
    assert_locked(state.break_service.book(&ana, lunch.id, date("2024-01-10")).await);
    assert_locked(
        state
            .break_service
            .save_template(&admin, "Other", &[slot("Tea", "15:00", "15:10", 1)])
            .await,
    );
    assert_locked(state.break_service.apply_template(&admin, "Standard", date("2024-02-01")).await);

    // Nada mudou
    let requests = state.request_service.list_all().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].completed);
    assert!(state.mistake_service.list_all().await.unwrap().is_empty());
    assert!(state.chat_service.list_recent().await.unwrap().is_empty());
    assert!(state.image_service.list_all().await.unwrap().is_empty());
    assert_eq!(state.auth_service.list_users(&admin).await.unwrap().len(), 2);
    assert_eq!(state.break_service.list_slots().await.unwrap().len(), 1);
    assert!(state.break_service.my_bookings(&ana).await.unwrap().is_empty());
    assert_eq!(state.break_service.list_templates().await.unwrap().len(), 1);
}

#[tokio::test]
async fn reads_keep_working_while_locked() {
    let state = setup().await;
    let admin = admin(&state).await;
    state
        .break_service
        .create_slot(&admin, &slot("Lunch", "12:00", "12:30", 2))
        .await
        .unwrap();

    lock(&state, &admin).await;

    assert!(state.request_service.list_all().await.is_ok());
    assert!(state.chat_service.search("oi").await.is_ok());
    let available = state
        .break_service
        .available_slots(date("2024-01-10"), Team::English, Shift::First)
        .await
        .unwrap();
    assert_eq!(available.len(), 1);
}

#[tokio::test]
async fn toggle_itself_is_never_locked() {
    let state = setup().await;
    let admin = admin(&state).await;
    let ana = agent(&state, &admin, "ana", Team::English, Shift::First).await;

    lock(&state, &admin).await;
    assert!(state.settings_service.is_enabled().await.unwrap());

    let settings = state.settings_service.toggle(&admin, false).await.unwrap();
    assert!(!settings.killswitch_enabled);
    assert!(settings.updated_at.is_some());

    let request = state
        .request_service
        .add(&ana, RequestType::Ticket, "TCK-9", "depois de destravar")
        .await;
    assert!(request.is_ok());
}

#[tokio::test]
async fn agents_cannot_toggle_the_killswitch() {
    let state = setup().await;
    let admin = admin(&state).await;
    let ana = agent(&state, &admin, "ana", Team::English, Shift::First).await;

    let result = state.settings_service.toggle(&ana, true).await;

    assert!(matches!(result, Err(AppError::Forbidden)));
    assert!(!state.settings_service.is_enabled().await.unwrap());
}

#[tokio::test]
async fn missing_settings_row_counts_as_locked() {
    let state = setup().await;
    let admin = admin(&state).await;
    sqlx::query("DELETE FROM system_settings")
        .execute(&state.db_pool)
        .await
        .unwrap();

    assert_locked(state.mistake_service.add(&admin, "ana", "TCK-2", "sem linha").await);
}
