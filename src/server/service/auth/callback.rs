use oauth2::{
    basic::BasicTokenType, AuthorizationCode, EmptyExtraTokenFields, StandardTokenResponse,
    TokenResponse,
};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::session::{DiscordProfile, SessionUser},
    service::auth::DiscordAuthService,
};

impl<'a> DiscordAuthService<'a> {
    /// Exchanges the authorization code and builds the session user.
    ///
    /// The Discord access token becomes the bearer token forwarded to the bot API.
    pub async fn callback(&self, authorization_code: String) -> Result<SessionUser, AppError> {
        let auth_code = AuthorizationCode::new(authorization_code);

        let token = self
            .oauth_client
            .exchange_code(auth_code)
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let profile = self.fetch_discord_profile(&token).await?;
        let access_token = token.access_token().secret().clone();

        Ok(profile.into_session_user(access_token))
    }

    /// Retrieves a Discord user's profile using the provided access token
    async fn fetch_discord_profile(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordProfile, AppError> {
        let access_token = token.access_token().secret();

        let profile = self
            .http_client
            .get(format!("{}/users/@me", self.api_url.trim_end_matches('/')))
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordProfile>()
            .await?;

        Ok(profile)
    }
}
