use tower_sessions::Session;

use crate::server::{
    error::{
        auth::{AuthError, Rejection},
        AppError,
    },
    middleware::session::AuthSession,
    model::session::SessionUser,
};

/// Gate run at the top of every API handler.
///
/// A request passes only when its session carries a user with an id and a bearer token.
/// Anything else is rejected with a 401 before the handler contacts an upstream service.
pub struct SessionGuard<'a> {
    session: &'a Session,
}

impl<'a> SessionGuard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Returns the session user, or a 401 rendered in the route's `rejection` style.
    pub async fn require(&self, rejection: Rejection) -> Result<SessionUser, AppError> {
        let Some(user) = AuthSession::new(self.session).get_user().await? else {
            return Err(AuthError::Unauthorized(rejection).into());
        };

        if user.id.is_empty() || !user.has_token() {
            tracing::debug!("Session user {} has no bearer token", user.id);
            return Err(AuthError::Unauthorized(rejection).into());
        }

        Ok(user)
    }
}
