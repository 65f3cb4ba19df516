//! Router tests: requests go through the full axum router and session layer, with every
//! upstream service replaced by a wiremock server.

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::SessionManagerLayer;
use wiremock::MockServer;

use crate::server::{
    config::Config, middleware::session::AuthSession, model::session::SessionUser, router,
    state::AppState,
};
use test_utils::{builder::TestBuilder, context::TestContext};

mod beta;

pub const TEST_TOKEN: &str = "user-bearer-token";

pub struct TestApp {
    pub server: MockServer,
    pub router: Router,
    pub context: TestContext,
}

impl TestApp {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let mut context = TestBuilder::new()
            .with_verification_tables()
            .build()
            .await
            .unwrap();

        let store = context.session_store().await.unwrap();
        let db = context.db.clone().unwrap();
        let state = AppState::for_test(db, Config::for_upstream(&server.uri()));

        let router =
            router::router(state).layer(SessionManagerLayer::new(store).with_secure(false));

        Self {
            server,
            router,
            context,
        }
    }

    /// Logs in the default test user and returns the `Cookie` header value.
    pub async fn login(&mut self) -> String {
        self.login_as(test_user()).await
    }

    pub async fn login_as(&mut self, user: SessionUser) -> String {
        let session = self.context.session().await.unwrap();
        AuthSession::new(session).set_user(&user).await.unwrap();

        TestContext::session_cookie(session).await.unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn test_user() -> SessionUser {
    SessionUser {
        id: "123456789".to_string(),
        name: "tester".to_string(),
        email: Some("tester@example.com".to_string()),
        token: TEST_TOKEN.to_string(),
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    post_raw(uri, cookie, &body.to_string())
}

pub fn post_raw(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

/// A POST carrying a JSON body but no Content-Type header.
pub fn post_untyped(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
