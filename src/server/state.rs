//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and cloned for each request through
//! Axum's state extraction. It holds:
//! - Database connection pool for sessions and the verification stores
//! - HTTP client for upstream requests
//! - OAuth2 clients for Discord login and Spotify client credentials
//! - Spotify access token cache
//! - Application configuration

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::{config::Config, service::music::spotify::SpotifyTokenCache};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// OAuth2 client used for the Spotify client-credentials grant, which only needs a token URL.
pub(crate) type ClientCredentialsClient = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - The OAuth2 clients are designed to be cloned
/// - `SpotifyTokenCache` and `Config` are shared through `Arc`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for the verification stores.
    pub db: DatabaseConnection,

    /// HTTP client for upstream API requests.
    ///
    /// Configured without redirects, as required by the OAuth2 token exchange.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Discord login flow.
    pub oauth_client: OAuth2Client,

    /// OAuth2 client for Spotify, absent when Spotify credentials are not configured.
    pub spotify_client: Option<ClientCredentialsClient>,

    /// Spotify access token reused across requests until it expires.
    pub spotify_tokens: SpotifyTokenCache,

    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for upstream requests
    /// - `oauth_client` - OAuth2 client for Discord authentication
    /// - `spotify_client` - OAuth2 client for Spotify, if configured
    /// - `config` - Application configuration
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        spotify_client: Option<ClientCredentialsClient>,
        config: Config,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            spotify_client,
            spotify_tokens: SpotifyTokenCache::new(),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State wired to `config` with fresh clients, for router and service tests.
    pub fn for_test(db: DatabaseConnection, config: Config) -> Self {
        use crate::server::startup;

        let http_client = startup::setup_reqwest_client().unwrap();
        let oauth_client = startup::setup_oauth_client(&config).unwrap();
        let spotify_client = startup::setup_spotify_client(&config).unwrap();

        Self::new(db, http_client, oauth_client, spotify_client, config)
    }
}
