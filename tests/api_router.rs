//! End-to-end tests of the HTTP API on the memory store.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use proeventos::{AppState, MemoryStore, build_router};

const SECRET: &str = "integration-test-secret";

fn app() -> Router {
    build_router(Arc::new(AppState::new(
        Arc::new(MemoryStore::new()),
        SECRET.to_string(),
    )))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Register `ana` and return a bearer token.
async fn login(app: &Router) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/account/register",
        None,
        Some(json!({"user_name": "ana", "email": "ana@proeventos.dev", "password": "pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/account/login",
        None,
        Some(json!({"user_name": "ana", "password": "pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

fn event_body(theme: &str) -> Value {
    json!({
        "theme": theme,
        "location": "Lisbon",
        "event_date": "2025-09-10T09:00:00",
        "description": "Rust in production",
        "people_count": 300,
        "image_url": "lisbon.png",
        "phone": "+351 210 000 000",
        "email": "hello@rustlisbon.pt"
    })
}

#[tokio::test]
async fn health_is_public() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert!(body["data"]["timestamp_ms"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn protected_route_requires_token() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/events", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2001);

    let (status, body) = send(&app, Method::GET, "/api/events", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2002);

    let token = login(&app).await;
    let (status, body) = send(&app, Method::GET, "/api/events", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_count"], 0);
}

async fn get_with_authorization(app: &Router, uri: &str, authorization: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn bearer_scheme_is_case_insensitive() {
    let app = app();
    let token = login(&app).await;
    for scheme in ["bearer", "BEARER", "Bearer"] {
        let (status, body) =
            get_with_authorization(&app, "/api/events", &format!("{} {}", scheme, token)).await;
        assert_eq!(status, StatusCode::OK, "scheme {}", scheme);
        assert_eq!(body["code"], 0);
    }

    let (status, body) =
        get_with_authorization(&app, "/api/events", &format!("Basic {}", token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2002);
}

#[tokio::test]
async fn expired_token_rejected() {
    let app = app();
    login(&app).await;
    let issued = chrono::Utc::now() - chrono::Duration::days(2);
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({
            "sub": "1",
            "name": "ana",
            "roles": [],
            "iat": issued.timestamp(),
            "exp": (issued + chrono::Duration::hours(24)).timestamp(),
        }),
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let (status, body) = send(&app, Method::GET, "/api/events", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2002);
}

#[tokio::test]
async fn bad_credentials_rejected() {
    let app = app();
    login(&app).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/account/login",
        None,
        Some(json!({"user_name": "ana", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2002);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/account/register",
        None,
        Some(json!({"user_name": "ana", "email": "other@proeventos.dev", "password": "pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn current_user_round_trip() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/account/user", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_name"], "ana");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/account/user",
        Some(&token),
        Some(json!({"user_name": "ana", "email": "ana@example.com", "first_name": "Ana"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "ana@example.com");
    assert_eq!(body["data"]["first_name"], "Ana");
}

#[tokio::test]
async fn event_create_then_get_returns_same_fields() {
    let app = app();
    let token = login(&app).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(&token),
        Some(event_body("Rust Lisbon")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, fetched) = send(
        &app,
        Method::GET,
        &format!("/api/events/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);
    for (field, value) in event_body("Rust Lisbon").as_object().unwrap() {
        assert_eq!(&fetched["data"][field], value, "field {}", field);
    }
}

#[tokio::test]
async fn event_validation_errors() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(&token),
        Some(json!({"theme": "ab", "people_count": 0, "email": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    let errors = body["errors"].as_object().unwrap();
    for field in ["theme", "location", "people_count", "email"] {
        assert!(errors.contains_key(field), "missing error for {}", field);
    }
}

#[tokio::test]
async fn unknown_event_is_404() {
    let app = app();
    let token = login(&app).await;
    let (status, body) = send(&app, Method::GET, "/api/events/404", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4004);
}

#[tokio::test]
async fn malformed_path_and_query_use_envelope() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/events/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    assert!(body["msg"].as_str().unwrap().contains("abc"));

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/speakers?page_number=first",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn lot_requires_name_and_price() {
    let app = app();
    let token = login(&app).await;
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(&token),
        Some(event_body("Rust Lisbon")),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/lots/{}", id);

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(&token),
        Some(json!({"quantity": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["name"][0], "The name field is required");
    assert_eq!(body["errors"]["price"][0], "The price field is required");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!([{"name": "Early", "price": "10.00"}, {"name": "Late"}])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].get("1.price").is_some());

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(&token),
        Some(json!({"name": "x".repeat(101), "price": "10.00"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["name"][0],
        "The name field must be at most 100 characters"
    );

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(&token),
        Some(json!({"name": "Early", "price": "10.00", "quantity": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["event_id"], id);
}

#[tokio::test]
async fn deleting_event_removes_lots_not_speakers() {
    let app = app();
    let token = login(&app).await;

    let (_, event) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(&token),
        Some(event_body("Rust Lisbon")),
    )
    .await;
    let event_id = event["data"]["id"].as_i64().unwrap();

    let (status, lots) = send(
        &app,
        Method::PUT,
        &format!("/api/lots/{}", event_id),
        Some(&token),
        Some(json!([
            {"name": "Early", "price": "10.00", "quantity": 50},
            {"name": "Regular", "price": "20.00", "quantity": 100}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let lot_id = lots["data"][0]["id"].as_i64().unwrap();

    let (_, speaker) = send(
        &app,
        Method::POST,
        "/api/speakers",
        Some(&token),
        Some(json!({"name": "Ferris"})),
    )
    .await;
    let speaker_id = speaker["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/events/{}/speakers/{}", event_id, speaker_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, loaded) = send(
        &app,
        Method::GET,
        &format!("/api/events/{}?include_speakers=true", event_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(loaded["data"]["lots"].as_array().unwrap().len(), 2);
    assert_eq!(loaded["data"]["speakers"][0]["name"], "Ferris");

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/events/{}", event_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/lots/{}/{}", event_id, lot_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/speakers/{}", speaker_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ferris");
}

#[tokio::test]
async fn speaker_crud() {
    let app = app();
    let token = login(&app).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/speakers",
        Some(&token),
        Some(json!({
            "name": "Ferris",
            "bio": "Crab",
            "social_media": [{"name": "GitHub", "url": "https://github.com/ferris"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["social_media"][0]["speaker_id"], id);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/speakers",
        Some(&token),
        Some(json!({"name": "Ghost", "social_media": [{"name": "GitHub"}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].get("social_media[0].url").is_some());

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/speakers/{}", id),
        Some(&token),
        Some(json!({"name": "Ferris the Crab", "social_media": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["name"], "Ferris the Crab");
    assert_eq!(updated["data"]["social_media"].as_array().unwrap().len(), 0);

    let (status, page) = send(
        &app,
        Method::GET,
        "/api/speakers?term=crab&page_size=5",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"]["total_count"], 1);
    assert_eq!(page["data"]["page_size"], 5);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/speakers/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/speakers/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn roles_appear_in_new_tokens() {
    let app = app();
    let token = login(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/account/roles",
        Some(&token),
        Some(json!({"name": "Organizer"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/account/roles",
        Some(&token),
        Some(json!({"name": "organizer"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/account/roles/Organizer/users/1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/account/login",
        None,
        Some(json!({"user_name": "ana", "password": "pass"})),
    )
    .await;
    assert_eq!(body["data"]["user"]["roles"][0], "Organizer");
}
