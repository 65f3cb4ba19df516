//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into HTTP responses. `AppError` is the top-level error type that
//! wraps domain-specific errors and implements `IntoResponse` for automatic error
//! handling in API endpoints.

pub mod auth;
pub mod config;
pub mod upstream;
pub mod verification;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, upstream::UpstreamError,
        verification::VerificationError,
    },
};

/// Top-level application error type.
///
/// Client-facing variants (`AuthErr`, `UpstreamErr`, `VerificationErr`, `NotFound`,
/// `BadRequest`) carry their own status and body. Infrastructure variants are logged and
/// rendered as a 500 with a generic message, or with the route-specific message attached
/// through [`AppError::failed_with`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Missing or incomplete session. Delegates to `AuthError::into_response()`.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Non-success response from an upstream service, relayed to the client.
    #[error(transparent)]
    UpstreamErr(#[from] UpstreamError),

    /// Verification flow rejection (already verified, throttled, expired...).
    #[error(transparent)]
    VerificationErr(#[from] VerificationError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// SQLx database driver error (session store migration).
    #[error(transparent)]
    SqlxErr(#[from] sea_orm::SqlxError),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Socket bind or serve failure.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error. Results in 404 Not Found with the provided message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error. Results in 400 Bad Request with the provided message.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error with custom message.
    ///
    /// The message is logged but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),

    /// Internal failure rendered with a route-specific message.
    ///
    /// `cause` is logged, `message` is returned to the client with a 500.
    #[error("{message}: {cause}")]
    Failed {
        message: &'static str,
        cause: String,
    },
}

impl AppError {
    /// Replaces an internal failure with a 500 carrying `message`.
    ///
    /// Client-facing errors (401, 4xx validation, relayed upstream statuses and
    /// verification rejections) pass through unchanged, as does an error that already
    /// carries a route message.
    pub fn failed_with(self, message: &'static str) -> Self {
        match self {
            Self::AuthErr(_)
            | Self::UpstreamErr(_)
            | Self::VerificationErr(_)
            | Self::NotFound(_)
            | Self::BadRequest(_)
            | Self::Failed { .. } => self,
            err => Self::Failed {
                message,
                cause: err.to_string(),
            },
        }
    }

    /// Replaces every error except a missing session with a plain-text 500.
    pub fn failed_as_text(self) -> Self {
        match self {
            Self::AuthErr(_) => self,
            err => {
                tracing::error!("{}", err);
                UpstreamError::PlainText {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal Server Error",
                }
                .into()
            }
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` variant
/// - 404 Not Found - For `NotFound` variant
/// - Variable - For `AuthErr`, `UpstreamErr` and `VerificationErr`, delegated to their
///   own `into_response()`
/// - 500 Internal Server Error - For all other error types
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::UpstreamErr(err) => err.into_response(),
            Self::VerificationErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::Failed { message, cause } => {
                tracing::error!("{}: {}", message, cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: message.to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_with_replaces_transport_errors() {
        let err = AppError::InternalError("boom".to_string()).failed_with("Failed to search music");

        assert!(matches!(
            err,
            AppError::Failed {
                message: "Failed to search music",
                ..
            }
        ));
    }

    #[test]
    fn failed_with_keeps_client_errors() {
        let err = AppError::BadRequest("Missing search query".to_string())
            .failed_with("Failed to search music");

        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Missing search query"));
    }

    #[test]
    fn failed_with_keeps_first_route_message() {
        let err = AppError::InternalError("boom".to_string())
            .failed_with("INTERNAL_ERROR")
            .failed_with("Verification failed");

        assert!(matches!(
            err,
            AppError::Failed {
                message: "INTERNAL_ERROR",
                ..
            }
        ));
    }

    #[test]
    fn failed_as_text_keeps_auth_errors() {
        let err = AppError::from(AuthError::Unauthorized(auth::Rejection::PlainText));

        assert_eq!(
            err.failed_as_text().into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn failed_as_text_renders_plain_500() {
        let response = AppError::NotFound("x".to_string())
            .failed_as_text()
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
