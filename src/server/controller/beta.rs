use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        beta::BetaApplicationDto,
    },
    server::{
        error::{auth::Rejection, AppError},
        middleware::auth::SessionGuard,
        service::{beta::BetaService, upstream::BotApi},
        state::AppState,
    },
};

/// Tag for grouping beta endpoints in OpenAPI documentation
pub static BETA_TAG: &str = "beta";

/// Submit a beta role application.
///
/// Forwards the application to the bot API with the session user's bearer token.
///
/// # Returns
/// - `200 OK` - `{"success": true}`
/// - `400 Bad Request` - Body is not valid JSON
/// - `401 Unauthorized` - No session
/// - Bot API status - Application rejected
/// - `500 Internal Server Error` - Bot API unreachable
#[utoipa::path(
    post,
    path = "/api/beta",
    tag = BETA_TAG,
    request_body = BetaApplicationDto,
    responses(
        (status = 200, description = "Application submitted", body = SuccessDto),
        (status = 400, description = "Invalid request body", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Failed to contact API", body = ErrorDto)
    ),
)]
pub async fn apply(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let user = SessionGuard::new(&session)
        .require(Rejection::Json("Unauthorized"))
        .await?;

    // Parsed by hand so clients that omit Content-Type are still accepted.
    let application: BetaApplicationDto = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Failed to parse beta application: {}", e);
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let api = BotApi::new(
        &state.http_client,
        &state.config.upstream.evict_api_url,
        &user.token,
    );
    BetaService::new(api).apply(&application).await?;

    Ok(Json(SuccessDto::ok()))
}
