use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, auth::UserDto},
    server::{
        error::{
            auth::{AuthError, Rejection},
            AppError,
        },
        middleware::{
            auth::SessionGuard,
            session::{AuthSession, CsrfSession},
        },
        service::auth::DiscordAuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Query parameters for the OAuth callback endpoint.
///
/// # Fields
/// - `state` - CSRF protection token that must match the value stored in the session
/// - `code` - Authorization code used to exchange for access tokens
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code from Discord for token exchange.
    pub code: String,
}

fn auth_service(state: &AppState) -> DiscordAuthService<'_> {
    DiscordAuthService::new(
        &state.http_client,
        &state.oauth_client,
        &state.config.discord.api_url,
    )
}

fn home_url(state: &AppState) -> String {
    format!("{}/", state.config.app_url.trim_end_matches('/'))
}

/// Redirects to Discord's authorization page.
///
/// Stores a CSRF token in the session which the callback validates.
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to Discord authorization"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let (url, csrf_token) = auth_service(&state).login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Completes the Discord login.
///
/// Validates the CSRF state, exchanges the authorization code, stores the user with the
/// Discord access token as bearer token, and redirects to the dashboard.
///
/// # Returns
/// - `307 Temporary Redirect` - Logged in, redirect to `APP_URL`
/// - `400 Bad Request` - CSRF mismatch or failed code exchange
/// - `500 Internal Server Error` - Discord profile lookup or session store failure
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 307, description = "Logged in, redirect to the dashboard"),
        (status = 400, description = "Login failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    validate_csrf(&session, &params.0.state).await?;

    let user = auth_service(&state).callback(params.0.code).await?;
    AuthSession::new(&session).set_user(&user).await?;

    tracing::info!("User {} logged in", user.id);

    Ok(Redirect::temporary(&home_url(&state)))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    if let Some(state) = stored_state {
        if state == csrf_state {
            return Ok(());
        }
    }

    Err(AppError::AuthErr(AuthError::CsrfValidationFailed))
}

/// Clears the session and redirects to the dashboard.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Logged out, redirect to the dashboard"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok(Redirect::temporary(&home_url(&state)))
}

/// Returns the logged-in user.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged-in user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_user(session: Session) -> Result<impl IntoResponse, AppError> {
    let user = SessionGuard::new(&session)
        .require(Rejection::Json("Unauthorized"))
        .await?;

    Ok(Json(user.into_dto()))
}
