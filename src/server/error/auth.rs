use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Body style used when a route rejects an unauthenticated request.
///
/// Routes disagree on the 401 body: some answer with plain text, others with a JSON
/// error code. The guard is told which one the route uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `Unauthorized` as `text/plain`.
    PlainText,
    /// `{"error": <code>}` as JSON.
    Json(&'static str),
}

#[derive(Error, Debug)]
pub enum AuthError {
    /// No session user, or a session user without a bearer token.
    #[error("Request has no authenticated session")]
    Unauthorized(Rejection),

    /// CSRF state validation failed during OAuth callback.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Exchanging the OAuth2 authorization code for a token failed.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `Unauthorized` → 401 with the route's rejection body
/// - `CsrfValidationFailed` / `TokenExchange` → 400 with a generic login message
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized(Rejection::PlainText) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            Self::Unauthorized(Rejection::Json(code)) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: code.to_string(),
                }),
            )
                .into_response(),
            err @ (Self::CsrfValidationFailed | Self::TokenExchange(_)) => {
                tracing::debug!("{}", err);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: "There was an issue logging you in, please try again.".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
