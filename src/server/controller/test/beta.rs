use super::*;
use axum::http::StatusCode;
use serde_json::json;
use wiremock::{
    matchers::{body_json as request_json, header as request_header, method, path},
    Mock, ResponseTemplate,
};

fn application() -> Value {
    json!({
        "role_id": "1234",
        "display_name": "Tester",
        "description": "I like testing",
        "discord_id": "123456789",
        "email": "tester@example.com"
    })
}

/// Tests that an anonymous application never reaches the bot API.
///
/// Expected: 401 `{"error": "Unauthorized"}`
#[tokio::test]
async fn rejects_anonymous_application() {
    let app = TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/evict/roles/apply"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let response = app.send(post_json("/api/beta", None, &application())).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
}

/// Tests that the application is forwarded with the user's bearer token.
///
/// Expected: 200 `{"success": true}`
#[tokio::test]
async fn forwards_application() {
    let mut app = TestApp::new().await;
    let cookie = app.login().await;
    Mock::given(method("POST"))
        .and(path("/evict/roles/apply"))
        .and(request_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(request_json(application()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app
        .send(post_json("/api/beta", Some(&cookie), &application()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));
}

/// Tests that a bot API rejection keeps its status.
///
/// Expected: 403 `{"error": "Failed to submit application"}`
#[tokio::test]
async fn relays_rejection_status() {
    let mut app = TestApp::new().await;
    let cookie = app.login().await;
    Mock::given(method("POST"))
        .and(path("/evict/roles/apply"))
        .respond_with(ResponseTemplate::new(403).set_body_string("not allowed"))
        .mount(&app.server)
        .await;

    let response = app
        .send(post_json("/api/beta", Some(&cookie), &application()))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to submit application" })
    );
}

/// Tests that a malformed body is refused before contacting the bot API.
///
/// Expected: 400 `{"error": "Invalid request body"}`
#[tokio::test]
async fn rejects_malformed_body() {
    let mut app = TestApp::new().await;
    let cookie = app.login().await;

    let response = app
        .send(post_raw("/api/beta", Some(&cookie), "{not json"))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "Invalid request body" }));
}

/// Tests that an application sent without a Content-Type header is still forwarded.
///
/// Expected: 200 `{"success": true}`
#[tokio::test]
async fn accepts_body_without_content_type() {
    let mut app = TestApp::new().await;
    let cookie = app.login().await;
    Mock::given(method("POST"))
        .and(path("/evict/roles/apply"))
        .and(request_json(application()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app
        .send(post_untyped(
            "/api/beta",
            Some(&cookie),
            &application().to_string(),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));
}
