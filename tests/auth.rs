mod common;

use agent_desk::{
    common::error::AppError,
    models::auth::{Role, Shift, Team},
};
use common::{admin, agent, setup, ADMIN_PASSWORD, ADMIN_USERNAME, AGENT_PASSWORD};

#[tokio::test]
async fn bootstrap_admin_can_log_in() {
    let state = setup().await;

    let identity = state
        .auth_service
        .authenticate(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();

    assert_eq!(identity.username, ADMIN_USERNAME);
    assert_eq!(identity.role, Role::Admin);
}

#[tokio::test]
async fn login_reports_the_exact_role_team_and_shift() {
    let state = setup().await;
    let admin = admin(&state).await;
    agent(&state, &admin, "maria", Team::Spanish, Shift::Second).await;

    let identity = state.auth_service.authenticate("maria", AGENT_PASSWORD).await.unwrap();

    assert_eq!(identity.role, Role::Agent);
    assert_eq!(identity.team, Team::Spanish);
    assert_eq!(identity.shift, Shift::Second);
}

#[tokio::test]
async fn unknown_user_and_wrong_password_fail_the_same_way() {
    let state = setup().await;

    let wrong_password = state.auth_service.authenticate(ADMIN_USERNAME, "errada").await;
    let unknown_user = state.auth_service.authenticate("ninguem", ADMIN_PASSWORD).await;

    assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
    assert!(matches!(unknown_user, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn issued_token_resolves_back_to_the_identity() {
    let state = setup().await;

    let response = state
        .auth_service
        .login_user(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();
    let identity = state.auth_service.validate_token(&response.token).await.unwrap();

    assert_eq!(identity, response.identity);
    assert!(matches!(
        state.auth_service.validate_token("nao-e-um-jwt").await,
        Err(AppError::InvalidToken)
    ));
}

#[tokio::test]
async fn deleted_user_loses_access_immediately() {
    let state = setup().await;
    let admin = admin(&state).await;
    let joao = agent(&state, &admin, "joao", Team::English, Shift::First).await;
    let token = state
        .auth_service
        .login_user("joao", AGENT_PASSWORD)
        .await
        .unwrap()
        .token;

    state.auth_service.delete_user(&admin, joao.user_id).await.unwrap();

    assert!(matches!(
        state.auth_service.validate_token(&token).await,
        Err(AppError::InvalidToken)
    ));
}

#[tokio::test]
async fn duplicate_username_is_a_constraint_violation() {
    let state = setup().await;
    let admin = admin(&state).await;
    agent(&state, &admin, "ana", Team::English, Shift::First).await;

    let again = state
        .auth_service
        .create_user(&admin, "ana", "outra", Role::Agent, Team::English, Shift::First)
        .await;

    assert!(matches!(again, Err(AppError::ConstraintViolation)));
}

#[tokio::test]
async fn agents_cannot_manage_users() {
    let state = setup().await;
    let admin = admin(&state).await;
    let ana = agent(&state, &admin, "ana", Team::English, Shift::First).await;

    let created = state
        .auth_service
        .create_user(&ana, "intruso", "x", Role::Admin, Team::English, Shift::First)
        .await;

    assert!(matches!(created, Err(AppError::Forbidden)));
    assert!(matches!(state.auth_service.list_users(&ana).await, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn bootstrap_admin_cannot_be_deleted_or_demoted() {
    let state = setup().await;
    let admin = admin(&state).await;

    let deleted = state.auth_service.delete_user(&admin, admin.user_id).await;
    let demoted = state
        .auth_service
        .update_user(&admin, admin.user_id, None, None, Some(Role::Agent), None, None)
        .await;

    assert!(matches!(deleted, Err(AppError::Forbidden)));
    assert!(matches!(demoted, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn password_change_takes_effect_on_next_login() {
    let state = setup().await;
    let admin = admin(&state).await;
    let ana = agent(&state, &admin, "ana", Team::English, Shift::First).await;

    let updated = state
        .auth_service
        .update_user(&admin, ana.user_id, None, Some("nova-senha"), None, Some(Team::Spanish), None)
        .await
        .unwrap();

    assert_eq!(updated.team, Team::Spanish);
    assert!(state.auth_service.authenticate("ana", "nova-senha").await.is_ok());
    assert!(matches!(
        state.auth_service.authenticate("ana", AGENT_PASSWORD).await,
        Err(AppError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn bootstrap_runs_only_once() {
    let state = setup().await;
    let admin = admin(&state).await;

    state.auth_service.ensure_bootstrap_admin().await.unwrap();

    let users = state.auth_service.list_users(&admin).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, ADMIN_USERNAME);
}

#[tokio::test]
async fn updating_a_missing_user_is_not_found() {
    let state = setup().await;
    let admin = admin(&state).await;

    let result = state
        .auth_service
        .update_user(&admin, 999, Some("fantasma"), None, None, None, None)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn empty_password_is_accepted_as_given() {
    let state = setup().await;
    let admin = admin(&state).await;
    state
        .auth_service
        .create_user(&admin, "sem_senha", "", Role::Agent, Team::English, Shift::First)
        .await
        .unwrap();

    let identity = state.auth_service.authenticate("sem_senha", "").await.unwrap();
    assert_eq!(identity.username, "sem_senha");
    assert!(matches!(
        state.auth_service.authenticate("sem_senha", AGENT_PASSWORD).await,
        Err(AppError::InvalidCredentials)
    ));
}
