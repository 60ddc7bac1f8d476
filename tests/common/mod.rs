// Helpers compartilhados pelos testes de integração.
#![allow(dead_code)]

use agent_desk::{
    config::{AppState, Config},
    models::{
        auth::{Identity, Role, Shift, Team},
        breaks::SlotDefinition,
    },
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "senha-de-teste";
pub const AGENT_PASSWORD: &str = "agente123";

// Menor custo aceito pelo bcrypt; deixa os testes rápidos
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        jwt_secret: "segredo-dos-testes".to_string(),
        bcrypt_cost: TEST_BCRYPT_COST,
        token_ttl_hours: 1,
        bootstrap_admin_username: ADMIN_USERNAME.to_string(),
        bootstrap_admin_password: ADMIN_PASSWORD.to_string(),
    }
}

/// Banco novo em memória, já migrado e com o admin inicial.
pub async fn setup() -> AppState {
    AppState::new(&test_config()).await.expect("estado de teste")
}

/// Banco em arquivo dentro de `dir` (pool com várias conexões, WAL).
pub async fn setup_file(dir: &std::path::Path) -> AppState {
    let config = Config {
        database_url: format!("sqlite://{}", dir.join("desk.db").display()),
        ..test_config()
    };
    AppState::new(&config).await.expect("estado de teste em arquivo")
}

pub async fn admin(state: &AppState) -> Identity {
    state
        .auth_service
        .authenticate(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("login do admin")
}

pub async fn agent(state: &AppState, admin: &Identity, username: &str, team: Team, shift: Shift) -> Identity {
    let user = state
        .auth_service
        .create_user(admin, username, AGENT_PASSWORD, Role::Agent, team, shift)
        .await
        .expect("criação do agente");
    Identity::from(&user)
}

pub async fn lock(state: &AppState, admin: &Identity) {
    state.settings_service.toggle(admin, true).await.expect("ativar killswitch");
}

pub fn slot(name: &str, start: &str, end: &str, max_capacity: i64) -> SlotDefinition {
    SlotDefinition {
        name: name.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        max_capacity,
        team: None,
        shift: None,
    }
}

pub fn date(raw: &str) -> chrono::NaiveDate {
    raw.parse().expect("data de teste")
}
