use test_utils::builder::TestBuilder;
use wiremock::MockServer;

use crate::server::{config::Config, model::session::SessionUser, state::AppState};

mod status;

async fn state(server: &MockServer) -> AppState {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.unwrap();

    AppState::for_test(db, Config::for_upstream(&server.uri()))
}

fn user(email: Option<&str>) -> SessionUser {
    SessionUser {
        id: "123456789".to_string(),
        name: "tester".to_string(),
        email: email.map(str::to_string),
        token: "user-bearer-token".to_string(),
    }
}
