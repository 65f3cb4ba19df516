use super::*;
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::server::{error::AppError, service::verification::VerificationService};

/// Expect the bot API's status JSON to be returned as is
#[tokio::test]
async fn returns_status_json() {
    let server = MockServer::start().await;
    let state = state(&server).await;
    Mock::given(method("GET"))
        .and(path("/evict/verification/status/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "verified": true })))
        .mount(&server)
        .await;

    let user = user(None);
    let status = VerificationService::new(&state, &user)
        .status("42")
        .await
        .unwrap();

    assert_eq!(status, json!({ "verified": true }));
}

/// Expect a non-success answer to be an internal error
#[tokio::test]
async fn fails_on_error_status() {
    let server = MockServer::start().await;
    let state = state(&server).await;
    Mock::given(method("GET"))
        .and(path("/evict/verification/status/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "NOT_FOUND" })))
        .mount(&server)
        .await;

    let user = user(None);
    let result = VerificationService::new(&state, &user).status("42").await;

    assert!(matches!(result, Err(AppError::InternalError(_))));
}
