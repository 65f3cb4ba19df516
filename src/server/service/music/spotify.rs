//! Spotify track lookup using the client-credentials grant.
//!
//! Access tokens are fetched through the OAuth2 client and cached in memory until shortly
//! before they expire, so most lookups cost a single search request.

use oauth2::TokenResponse;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::server::{
    error::AppError, model::music::SpotifySearch, state::ClientCredentialsClient,
};

/// A token is treated as expired this long before Spotify would reject it.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when the token response omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_expired(&self, now: Instant) -> bool {
        now + TOKEN_EXPIRY_MARGIN >= self.expires_at
    }
}

/// Shared Spotify access token.
#[derive(Clone, Default)]
pub struct SpotifyTokenCache {
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl SpotifyTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token unless it is about to expire.
    pub async fn get(&self) -> Option<String> {
        let token = self.token.read().await;

        token
            .as_ref()
            .filter(|token| !token.is_expired(Instant::now()))
            .map(|token| token.access_token.clone())
    }

    pub async fn set(&self, access_token: String, expires_in: Duration) {
        let mut token = self.token.write().await;

        *token = Some(CachedToken {
            access_token,
            expires_at: Instant::now() + expires_in,
        });
    }
}

pub struct SpotifyClient<'a> {
    http_client: &'a reqwest::Client,
    oauth_client: Option<&'a ClientCredentialsClient>,
    tokens: &'a SpotifyTokenCache,
    api_url: &'a str,
}

impl<'a> SpotifyClient<'a> {
    pub fn new(
        http_client: &'a reqwest::Client,
        oauth_client: Option<&'a ClientCredentialsClient>,
        tokens: &'a SpotifyTokenCache,
        api_url: &'a str,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            tokens,
            api_url,
        }
    }

    /// Finds the Spotify id of the best match for `title` by `artist`.
    ///
    /// # Returns
    /// - `Ok(Some(id))` - A track matched
    /// - `Ok(None)` - No match, or Spotify credentials are not configured
    /// - `Err(AppError)` - Token request or search failed
    pub async fn track_id(&self, artist: &str, title: &str) -> Result<Option<String>, AppError> {
        let Some(oauth_client) = self.oauth_client else {
            return Ok(None);
        };

        let access_token = self.access_token(oauth_client).await?;
        let query = format!("track:{} artist:{}", title, artist);

        let search = self
            .http_client
            .get(format!("{}/search", self.api_url.trim_end_matches('/')))
            .bearer_auth(access_token)
            .query(&[("q", query.as_str()), ("type", "track"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json::<SpotifySearch>()
            .await?;

        Ok(search.tracks.items.into_iter().next().map(|track| track.id))
    }

    async fn access_token(
        &self,
        oauth_client: &ClientCredentialsClient,
    ) -> Result<String, AppError> {
        if let Some(token) = self.tokens.get().await {
            return Ok(token);
        }

        let token = oauth_client
            .exchange_client_credentials()
            .request_async(self.http_client)
            .await
            .map_err(|e| {
                AppError::InternalError(format!("Spotify token request failed: {}", e))
            })?;

        let access_token = token.access_token().secret().clone();
        let expires_in = token.expires_in().unwrap_or(DEFAULT_TOKEN_LIFETIME);

        self.tokens.set(access_token.clone(), expires_in).await;
        tracing::debug!("Refreshed Spotify access token, valid for {:?}", expires_in);

        Ok(access_token)
    }
}
