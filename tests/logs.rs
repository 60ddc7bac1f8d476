mod common;

use std::time::Duration;

use agent_desk::{
    common::error::AppError,
    models::{
        auth::{Shift, Team},
        requests::RequestType,
    },
};
use chrono::Utc;
use common::{admin, agent, setup, setup_file};

// --- Solicitações ---

#[tokio::test]
async fn request_is_recorded_under_the_caller() {
    let state = setup().await;
    let admin = admin(&state).await;
    let ana = agent(&state, &admin, "ana", Team::English, Shift::First).await;

    let request = state
        .request_service
        .add(&ana, RequestType::Phone, "  555-0101 ", "retornar amanhã")
        .await
        .unwrap();

    assert_eq!(request.agent_name, "ana");
    assert_eq!(request.request_type, RequestType::Phone);
    assert_eq!(request.identifier, "555-0101");
    assert!(!request.completed);
}

#[tokio::test]
async fn marking_completed_twice_is_harmless() {
    let state = setup().await;
    let admin = admin(&state).await;
    let request = state
        .request_service
        .add(&admin, RequestType::Ticket, "TCK-1", "")
        .await
        .unwrap();

    let first = state.request_service.set_completed(&admin, request.id, true).await.unwrap();
    let second = state.request_service.set_completed(&admin, request.id, true).await.unwrap();
    assert!(first.completed);
    assert!(second.completed);

    let reopened = state.request_service.set_completed(&admin, request.id, false).await.unwrap();
    assert!(!reopened.completed);

    assert!(matches!(
        state.request_service.set_completed(&admin, 4242, true).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn request_search_ignores_case() {
    let state = setup().await;
    let admin = admin(&state).await;
    state
        .request_service
        .add(&admin, RequestType::Email, "Cliente@Exemplo.com", "")
        .await
        .unwrap();
    state
        .request_service
        .add(&admin, RequestType::Phone, "555-0101", "ligar de volta")
        .await
        .unwrap();

    let found = state.request_service.search("cliente@exemplo").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].request_type, RequestType::Email);

    let by_comment = state.request_service.search("LIGAR").await.unwrap();
    assert_eq!(by_comment.len(), 1);
}

// --- Erros ---

#[tokio::test]
async fn mistake_search_finds_by_ticket() {
    let state = setup().await;
    let admin = admin(&state).await;
    state
        .mistake_service
        .add(&admin, "maria", "TCK-500", "Encerrou o ticket sem resposta")
        .await
        .unwrap();
    state
        .mistake_service
        .add(&admin, "joao", "TCK-777", "Tag errada")
        .await
        .unwrap();

    let found = state.mistake_service.search("TCK-500").await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].agent_name, "maria");
    assert_eq!(found[0].team_leader, "admin");
}

// --- Chat ---

#[tokio::test]
async fn chat_listing_is_capped_at_fifty_newest_first() {
    let state = setup().await;
    let admin = admin(&state).await;
    for i in 0..55 {
        state.chat_service.send(&admin, &format!("mensagem {i}")).await.unwrap();
    }

    let messages = state.chat_service.list_recent().await.unwrap();

    assert_eq!(messages.len(), 50);
    assert_eq!(messages[0].body, "mensagem 54");
    assert_eq!(messages[49].body, "mensagem 5");
}

#[tokio::test]
async fn mentions_reach_only_the_named_user() {
    let state = setup().await;
    let admin = admin(&state).await;
    let alice = agent(&state, &admin, "alice", Team::English, Shift::First).await;
    let bob = agent(&state, &admin, "bob", Team::English, Shift::First).await;
    let carol = agent(&state, &admin, "carol", Team::Spanish, Shift::Second).await;

    let sent = state
        .chat_service
        .send(&alice, "@bob pode cobrir meu intervalo?")
        .await
        .unwrap();
    assert_eq!(sent.mentions, vec!["bob".to_string()]);

    let for_bob = state.chat_service.mentions_for(&bob).await.unwrap();
    assert_eq!(for_bob.len(), 1);
    assert_eq!(for_bob[0].sender, "alice");
    assert!(state.chat_service.mentions_for(&carol).await.unwrap().is_empty());
}

#[tokio::test]
async fn chat_search_covers_sender_and_body() {
    let state = setup().await;
    let admin = admin(&state).await;
    let alice = agent(&state, &admin, "alice", Team::English, Shift::First).await;
    state.chat_service.send(&alice, "bom dia").await.unwrap();
    state.chat_service.send(&admin, "reunião às 10").await.unwrap();

    assert_eq!(state.chat_service.search("ALICE").await.unwrap().len(), 1);
    assert_eq!(state.chat_service.search("reunião").await.unwrap().len(), 1);
    assert_eq!(state.chat_service.search("").await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_on_a_file_database_are_all_stored() {
    let dir = tempfile::tempdir().unwrap();
    let state = setup_file(dir.path()).await;
    let admin = admin(&state).await;
    let ana = agent(&state, &admin, "ana", Team::English, Shift::First).await;

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let state = state.clone();
            let ana = ana.clone();
            tokio::spawn(async move {
                state
                    .request_service
                    .add(&ana, RequestType::Ticket, &format!("TCK-{i}"), "")
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(state.request_service.list_all().await.unwrap().len(), 20);
}

// --- Notificações ---

#[tokio::test]
async fn notifications_only_include_activity_after_since() {
    let state = setup().await;
    let admin = admin(&state).await;
    let bob = agent(&state, &admin, "bob", Team::English, Shift::First).await;

    state
        .request_service
        .add(&admin, RequestType::Email, "antiga@exemplo.com", "")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let since = Utc::now();
    tokio::time::sleep(Duration::from_millis(10)).await;

    state
        .request_service
        .add(&admin, RequestType::Ticket, "TCK-42", "")
        .await
        .unwrap();
    state.chat_service.send(&admin, "@bob olha o TCK-42").await.unwrap();
    state.chat_service.send(&admin, "bom almoço a todos").await.unwrap();

    let feed = state.notification_service.since(&bob, since).await.unwrap();
    assert_eq!(feed.new_requests.len(), 1);
    assert_eq!(feed.new_requests[0].identifier, "TCK-42");
    assert_eq!(feed.new_messages.len(), 2);
    assert_eq!(feed.mentions.len(), 1);

    tokio::time::sleep(Duration::from_millis(10)).await;
    let later = state.notification_service.since(&bob, Utc::now()).await.unwrap();
    assert!(later.new_requests.is_empty());
    assert!(later.new_messages.is_empty());
}

// --- Imagens ---

#[tokio::test]
async fn hold_images_round_trip_as_base64() {
    let state = setup().await;
    let admin = admin(&state).await;

    state.image_service.upload(&admin, "Zmlyc3Q=").await.unwrap();
    let second = state.image_service.upload(&admin, "c2Vjb25k").await.unwrap();

    let latest = state.image_service.latest().await.unwrap().unwrap();
    assert_eq!(latest.id, second.id);
    assert_eq!(latest.image_base64, "c2Vjb25k");
    assert_eq!(state.image_service.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn image_upload_rejects_bad_input_and_agents() {
    let state = setup().await;
    let admin = admin(&state).await;
    let ana = agent(&state, &admin, "ana", Team::English, Shift::First).await;

    assert!(matches!(
        state.image_service.upload(&admin, "isto não é base64!").await,
        Err(AppError::InvalidInput(_))
    ));
    assert!(matches!(
        state.image_service.upload(&ana, "aGVsbG8=").await,
        Err(AppError::Forbidden)
    ));
    assert!(state.image_service.latest().await.unwrap().is_none());
}

// --- Limpezas ---

#[tokio::test]
async fn clearing_logs_is_admin_only() {
    let state = setup().await;
    let admin = admin(&state).await;
    let ana = agent(&state, &admin, "ana", Team::English, Shift::First).await;
    state.request_service.add(&ana, RequestType::Email, "a@b.c", "").await.unwrap();
    state.mistake_service.add(&admin, "ana", "TCK-3", "x").await.unwrap();
    state.chat_service.send(&ana, "oi").await.unwrap();

    assert!(matches!(state.request_service.clear_all(&ana).await, Err(AppError::Forbidden)));
    assert!(matches!(state.mistake_service.clear_all(&ana).await, Err(AppError::Forbidden)));
    assert!(matches!(state.chat_service.clear_all(&ana).await, Err(AppError::Forbidden)));

    assert_eq!(state.request_service.clear_all(&admin).await.unwrap(), 1);
    assert_eq!(state.mistake_service.clear_all(&admin).await.unwrap(), 1);
    assert_eq!(state.chat_service.clear_all(&admin).await.unwrap(), 1);
    assert!(state.request_service.list_all().await.unwrap().is_empty());
}
