use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Rejections raised by the verification flow itself rather than by the bot API.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// The guild reports the user as verified, or the bot API refused to start again.
    #[error("ALREADY_VERIFIED")]
    AlreadyVerified,

    /// The email address exhausted its verification sends for the current window.
    #[error("TOO_MANY_ATTEMPTS")]
    TooManyAttempts,

    /// A code was submitted with a client timestamp outside the freshness window.
    #[error("Request expired")]
    RequestExpired,

    /// The bot API did not confirm the email code as valid.
    #[error("Invalid or expired verification code")]
    InvalidCode,

    /// The session user has no email address to send a code to.
    #[error("Session user has no email address")]
    MissingEmail,
}

/// Converts verification errors into HTTP responses.
///
/// - `AlreadyVerified`, `RequestExpired`, `InvalidCode` → 400
/// - `TooManyAttempts` → 429
/// - `MissingEmail` → 500 `INTERNAL_ERROR`
impl IntoResponse for VerificationError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::AlreadyVerified | Self::RequestExpired | Self::InvalidCode => {
                StatusCode::BAD_REQUEST
            }
            Self::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            Self::MissingEmail => {
                tracing::error!("{}", self);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "INTERNAL_ERROR".to_string(),
                    }),
                )
                    .into_response();
            }
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
