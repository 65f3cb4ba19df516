use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        verification::{
            EmailCodeDto, EmailCodeQuery, StartedVerificationDto, StoreEmailCodeDto,
            VerifyRequestDto,
        },
    },
    server::{
        error::{auth::Rejection, AppError},
        middleware::auth::SessionGuard,
        service::verification::{code::EmailCodeService, VerificationService},
        state::AppState,
    },
};

/// Tag for grouping verification endpoints in OpenAPI documentation
pub static VERIFICATION_TAG: &str = "verification";

const MISSING_AUTHORIZATION: Rejection = Rejection::Json("MISSING_AUTHORIZATION");

/// Get a guild's verification status.
///
/// Relays the bot API's status JSON. Any failure is reported as a plain-text 500.
#[utoipa::path(
    get,
    path = "/api/verification/status/{guild_id}",
    tag = VERIFICATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Verification status from the bot API"),
        (status = 401, description = "Not logged in (plain text)"),
        (status = 500, description = "Internal Server Error (plain text)")
    ),
)]
pub async fn get_status(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = SessionGuard::new(&session)
        .require(Rejection::PlainText)
        .await?;

    let status = VerificationService::new(&state, &user)
        .status(&guild_id)
        .await
        .map_err(AppError::failed_as_text)?;

    Ok(Json(status))
}

/// Start verifying the session user in a guild.
///
/// # Returns
/// - `200 OK` - `{session, expires_at}`, or the bot API's JSON for the questions method
/// - `400 Bad Request` - `ALREADY_VERIFIED`
/// - `401 Unauthorized` - `MISSING_AUTHORIZATION`
/// - `429 Too Many Requests` - `TOO_MANY_ATTEMPTS`
/// - Bot API status - Bot API error code relayed
/// - `500 Internal Server Error` - `INTERNAL_ERROR`
#[utoipa::path(
    post,
    path = "/api/verification/start/{guild_id}/{user_id}",
    tag = VERIFICATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("user_id" = String, Path, description = "Discord user ID")
    ),
    responses(
        (status = 200, description = "Session started", body = StartedVerificationDto),
        (status = 400, description = "Already verified", body = ErrorDto),
        (status = 401, description = "Missing authorization", body = ErrorDto),
        (status = 429, description = "Too many verification emails", body = ErrorDto),
        (status = 500, description = "Internal error", body = ErrorDto)
    ),
)]
pub async fn start(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = SessionGuard::new(&session)
        .require(MISSING_AUTHORIZATION)
        .await?;

    let outcome = VerificationService::new(&state, &user)
        .start(&guild_id, &user_id)
        .await
        .map_err(|e| e.failed_with("INTERNAL_ERROR"))?;

    Ok(Json(outcome))
}

/// Complete a verification session.
///
/// Submits questionnaire answers, an hCaptcha token, or an email code depending on the
/// request body.
#[utoipa::path(
    post,
    path = "/api/verification/verify/{guild_id}/{user_id}",
    tag = VERIFICATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("user_id" = String, Path, description = "Discord user ID")
    ),
    request_body = VerifyRequestDto,
    responses(
        (status = 200, description = "Bot API verification result"),
        (status = 400, description = "Invalid or expired verification code", body = ErrorDto),
        (status = 401, description = "Missing authorization", body = ErrorDto),
        (status = 500, description = "Verification failed", body = ErrorDto)
    ),
)]
pub async fn verify(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, user_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let user = SessionGuard::new(&session)
        .require(MISSING_AUTHORIZATION)
        .await?;

    let request: VerifyRequestDto = serde_json::from_slice(&body).map_err(|e| {
        AppError::InternalError(format!("Invalid verify request: {}", e))
            .failed_with("Verification failed")
    })?;

    let result = VerificationService::new(&state, &user)
        .verify(&guild_id, &user_id, request)
        .await
        .map_err(|e| e.failed_with("Verification failed"))?;

    Ok(Json(result))
}

/// Look up a stored email code by verification session id.
#[utoipa::path(
    get,
    path = "/api/verification/email/code",
    tag = VERIFICATION_TAG,
    params(
        ("session" = String, Query, description = "Verification session ID")
    ),
    responses(
        (status = 200, description = "Stored code", body = EmailCodeDto),
        (status = 400, description = "Missing session", body = ErrorDto),
        (status = 401, description = "Not logged in (plain text)"),
        (status = 404, description = "Code not found", body = ErrorDto)
    ),
)]
pub async fn get_email_code(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<EmailCodeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = SessionGuard::new(&session)
        .require(Rejection::PlainText)
        .await?;

    let code = EmailCodeService::new(&state.db, state.config.code_ttl)
        .get(query.session.as_deref(), Utc::now())
        .await?;

    Ok(Json(EmailCodeDto { code }))
}

/// Store an email code for a verification session.
///
/// `timestamp` is the client's clock in epoch milliseconds and must be at most 30
/// seconds old.
#[utoipa::path(
    post,
    path = "/api/verification/email/code",
    tag = VERIFICATION_TAG,
    request_body = StoreEmailCodeDto,
    responses(
        (status = 200, description = "Code stored", body = SuccessDto),
        (
            status = 400,
            description = "Missing required fields, request expired or invalid request",
            body = ErrorDto
        ),
        (status = 401, description = "Not logged in (plain text)")
    ),
)]
pub async fn store_email_code(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let _ = SessionGuard::new(&session)
        .require(Rejection::PlainText)
        .await?;

    let request: StoreEmailCodeDto = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Failed to parse email code request: {}", e);
        AppError::BadRequest("Invalid request".to_string())
    })?;

    EmailCodeService::new(&state.db, state.config.code_ttl)
        .store(request, Utc::now())
        .await?;

    Ok(Json(SuccessDto::ok()))
}
