use oauth2::{CsrfToken, Scope};
use url::Url;

use crate::server::service::auth::DiscordAuthService;

/// Scopes requested at login. `email` is needed for email verification.
const LOGIN_SCOPES: [&str; 3] = ["identify", "email", "guilds"];

impl<'a> DiscordAuthService<'a> {
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let (authorize_url, csrf_state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(LOGIN_SCOPES.iter().map(|s| Scope::new(s.to_string())))
            .url();

        (authorize_url, csrf_state)
    }
}
