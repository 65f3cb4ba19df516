use crate::server::{
    error::{
        auth::{AuthError, Rejection},
        AppError,
    },
    middleware::{auth::SessionGuard, session::AuthSession},
    model::session::SessionUser,
};
use test_utils::context::TestContext;

mod require;

fn session_user(token: &str) -> SessionUser {
    SessionUser {
        id: "123456789".to_string(),
        name: "tester".to_string(),
        email: Some("tester@example.com".to_string()),
        token: token.to_string(),
    }
}
