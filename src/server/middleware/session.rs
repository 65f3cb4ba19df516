//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but exposes only the methods relevant
//! to its concern:
//! - `AuthSession` - The logged-in user and the bearer token forwarded upstream
//! - `CsrfSession` - CSRF token management for the Discord login flow

use tower_sessions::Session;

use crate::server::{error::AppError, model::session::SessionUser};

const SESSION_AUTH_USER: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the authenticated user after a successful login.
    ///
    /// The session id is cycled first so a session fixed before login cannot be reused.
    ///
    /// # Returns
    /// - `Ok(())` - User stored
    /// - `Err(AppError::SessionErr(_))` - Failed to write to the session store
    pub async fn set_user(&self, user: &SessionUser) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_USER, user).await?;
        Ok(())
    }

    /// Retrieves the authenticated user.
    ///
    /// # Returns
    /// - `Ok(Some(user))` - A user logged in with this session
    /// - `Ok(None)` - Anonymous session
    /// - `Err(AppError::SessionErr(_))` - Failed to read the session store
    pub async fn get_user(&self) -> Result<Option<SessionUser>, AppError> {
        Ok(self.session.get::<SessionUser>(SESSION_AUTH_USER).await?)
    }

    /// Removes all data from the session and deletes it from the store.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}

/// CSRF protection session management.
///
/// Tokens are stored when the login redirect is issued and consumed by the callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token, so each token validates one callback only.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - CSRF token was found and removed
    /// - `Ok(None)` - No CSRF token in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}
