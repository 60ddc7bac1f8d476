mod common;

use agent_desk::{
    app,
    config::AppState,
    models::auth::{Shift, Team},
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use common::{admin, agent, lock, setup, ADMIN_PASSWORD, ADMIN_USERNAME, AGENT_PASSWORD};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn login(state: &AppState, username: &str, password: &str) -> String {
    let (status, body) = send(
        state,
        json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "username": username, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_and_openapi_are_public() {
    let state = setup().await;

    let (status, _) = send(&state, get("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, doc) = send(&state, get("/api/docs/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/breaks/available"].is_object());
}

#[tokio::test]
async fn login_then_me_returns_the_identity() {
    let state = setup().await;
    let token = login(&state, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (status, body) = send(&state, get("/api/users/me", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], ADMIN_USERNAME);
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let state = setup().await;

    let (status, body) = send(
        &state,
        json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "username": ADMIN_USERNAME, "password": "errada" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let state = setup().await;

    let (status, _) = send(&state, get("/api/requests", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&state, get("/api/requests", Some("lixo"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn agents_get_forbidden_on_admin_routes() {
    let state = setup().await;
    let admin = admin(&state).await;
    agent(&state, &admin, "ana", Team::English, Shift::First).await;
    let token = login(&state, "ana", AGENT_PASSWORD).await;

    let (status, _) = send(
        &state,
        json_request(
            Method::POST,
            "/api/breaks/slots",
            Some(&token),
            json!({ "name": "Lunch", "startTime": "12:00", "endTime": "12:30", "maxCapacity": 2 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn writes_are_locked_when_the_killswitch_is_on() {
    let state = setup().await;
    let admin = admin(&state).await;
    let token = login(&state, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    lock(&state, &admin).await;

    let (status, _) = send(
        &state,
        json_request(
            Method::POST,
            "/api/requests",
            Some(&token),
            json!({ "requestType": "Email", "identifier": "a@b.c" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::LOCKED);

    let (status, body) = send(&state, get("/api/settings/killswitch", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["killswitchEnabled"], true);
}

#[tokio::test]
async fn booking_flow_over_http() {
    let state = setup().await;
    let admin = admin(&state).await;
    agent(&state, &admin, "ana", Team::English, Shift::First).await;
    let admin_token = login(&state, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let agent_token = login(&state, "ana", AGENT_PASSWORD).await;

    let (status, slot) = send(
        &state,
        json_request(
            Method::POST,
            "/api/breaks/slots",
            Some(&admin_token),
            json!({ "name": "Lunch", "startTime": "12:00", "endTime": "12:30", "maxCapacity": 1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(slot["team"], "all");

    let (status, available) =
        send(&state, get("/api/breaks/available?date=2024-01-10", Some(&agent_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(available[0]["remaining"], 1);

    let booking = json!({ "breakSlotId": slot["id"], "date": "2024-01-10" });
    let (status, _) = send(
        &state,
        json_request(Method::POST, "/api/breaks/bookings", Some(&agent_token), booking.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &state,
        json_request(Method::POST, "/api/breaks/bookings", Some(&admin_token), booking),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, mine) = send(&state, get("/api/breaks/bookings/me", Some(&agent_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_payload_reports_field_details() {
    let state = setup().await;
    let token = login(&state, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (status, body) = send(
        &state,
        json_request(
            Method::POST,
            "/api/mistakes",
            Some(&token),
            json!({ "agentName": "", "ticketId": "TCK-1", "errorDescription": "x" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_object().is_some_and(|d| !d.is_empty()));
}
