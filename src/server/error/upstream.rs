use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// A non-success answer from an upstream service, surfaced to the browser.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Relay `status` with a JSON body.
    #[error("Upstream responded with {status}: {body}")]
    Status { status: StatusCode, body: Value },

    /// Relay `status` with a plain-text body.
    #[error("Upstream responded with {status}: {message}")]
    PlainText {
        status: StatusCode,
        message: &'static str,
    },
}

impl UpstreamError {
    /// `{"error": message}` with the upstream status.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        match self {
            Self::Status { status, body } => {
                tracing::debug!("Relaying upstream status {}", status);
                (status, Json(body)).into_response()
            }
            Self::PlainText { status, message } => (status, message).into_response(),
        }
    }
}
