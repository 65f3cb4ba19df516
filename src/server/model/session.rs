use serde::{Deserialize, Serialize};

use crate::model::auth::UserDto;

/// Authenticated user stored in the session after login.
///
/// `token` is the bearer token presented to the bot API on the user's behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub token: String,
}

impl SessionUser {
    /// A session user can forward requests only when it carries a bearer token.
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
        }
    }
}

/// The `users/@me` profile returned by Discord for the `identify email` scopes.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl DiscordProfile {
    /// Builds the session user, preferring the display name over the unique username.
    pub fn into_session_user(self, token: String) -> SessionUser {
        SessionUser {
            id: self.id,
            name: self.global_name.unwrap_or(self.username),
            email: self.email,
            token,
        }
    }
}
