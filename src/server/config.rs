use chrono::Duration;

use crate::server::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_API_URL: &str = "https://discord.com/api";

const EVICT_API_URL: &str = "https://api.evict.bot";
const LASTFM_API_URL: &str = "http://ws.audioscrobbler.com/2.0/";
const DEEZER_API_URL: &str = "https://api.deezer.com";
const LISTEN_API_URL: &str = "https://listen.squareweb.app";
const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SENDGRID_MAIL_URL: &str = "https://api.sendgrid.com/v3/mail/send";
const HCAPTCHA_VERIFY_URL: &str = "https://api.hcaptcha.com/siteverify";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_APP_URL: &str = "http://localhost:8080";
const DEFAULT_CODE_TTL_SECONDS: i64 = 600;

/// Discord OAuth2 application used to issue dashboard sessions.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

/// Base URLs of every service the dashboard forwards to.
///
/// Production values are the defaults; tests point them at stub servers.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub evict_api_url: String,
    pub lastfm_url: String,
    pub deezer_url: String,
    pub listen_url: String,
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub sendgrid_url: String,
    pub hcaptcha_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            evict_api_url: EVICT_API_URL.to_string(),
            lastfm_url: LASTFM_API_URL.to_string(),
            deezer_url: DEEZER_API_URL.to_string(),
            listen_url: LISTEN_API_URL.to_string(),
            spotify_api_url: SPOTIFY_API_URL.to_string(),
            spotify_token_url: SPOTIFY_TOKEN_URL.to_string(),
            sendgrid_url: SENDGRID_MAIL_URL.to_string(),
            hcaptcha_url: HCAPTCHA_VERIFY_URL.to_string(),
        }
    }
}

/// Third-party credentials. Routes that need a missing credential fail with a 500.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub listen_api_key: Option<String>,
    pub lastfm_api_key: Option<String>,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_template_id: Option<String>,
    pub hcaptcha_secret: Option<String>,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
}

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub app_url: String,

    pub discord: DiscordConfig,
    pub upstream: UpstreamConfig,
    pub credentials: Credentials,

    /// How long a stored email verification code stays readable.
    pub code_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let upstream = UpstreamConfig {
            evict_api_url: optional_var("EVICT_API_URL")
                .unwrap_or_else(|| EVICT_API_URL.to_string()),
            ..UpstreamConfig::default()
        };

        let code_ttl_seconds = match optional_var("VERIFICATION_CODE_TTL_SECS") {
            Some(value) => value.parse::<i64>().map_err(|_| ConfigError::InvalidValue {
                name: "VERIFICATION_CODE_TTL_SECS".to_string(),
                value,
            })?,
            None => DEFAULT_CODE_TTL_SECONDS,
        };

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            bind_address: optional_var("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            app_url: optional_var("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
            discord: DiscordConfig {
                client_id: required_var("DISCORD_CLIENT_ID")?,
                client_secret: required_var("DISCORD_CLIENT_SECRET")?,
                redirect_url: required_var("DISCORD_REDIRECT_URL")?,
                auth_url: DISCORD_AUTH_URL.to_string(),
                token_url: DISCORD_TOKEN_URL.to_string(),
                api_url: DISCORD_API_URL.to_string(),
            },
            upstream,
            credentials: Credentials {
                listen_api_key: optional_var("LISTEN_API_KEY"),
                lastfm_api_key: optional_var("LASTFM_API_KEY"),
                sendgrid_api_key: optional_var("SENDGRID_API_KEY"),
                sendgrid_template_id: optional_var("SENDGRID_TEMPLATE_ID"),
                hcaptcha_secret: optional_var("HCAPTCHA_SECRET_KEY"),
                spotify_client_id: optional_var("SPOTIFY_CLIENT_ID"),
                spotify_client_secret: optional_var("SPOTIFY_CLIENT_SECRET"),
            },
            code_ttl: Duration::seconds(code_ttl_seconds),
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads an environment variable, treating empty values as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Returns a configured credential or an internal error naming the missing variable.
pub fn require_credential<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .ok_or_else(|| AppError::InternalError(format!("{} is not configured", name)))
}

#[cfg(test)]
impl Config {
    /// Configuration with every upstream rooted at `base` (a stub server) and all
    /// credentials set to fixed test values.
    pub fn for_upstream(base: &str) -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            discord: DiscordConfig {
                client_id: "client-id".to_string(),
                client_secret: "client-secret".to_string(),
                redirect_url: format!("{}/api/auth/callback", DEFAULT_APP_URL),
                auth_url: format!("{}/discord/oauth2/authorize", base),
                token_url: format!("{}/discord/oauth2/token", base),
                api_url: format!("{}/discord", base),
            },
            upstream: UpstreamConfig {
                evict_api_url: format!("{}/evict", base),
                lastfm_url: format!("{}/2.0/", base),
                deezer_url: format!("{}/deezer", base),
                listen_url: format!("{}/listen", base),
                spotify_api_url: format!("{}/spotify/v1", base),
                spotify_token_url: format!("{}/spotify/token", base),
                sendgrid_url: format!("{}/sendgrid/v3/mail/send", base),
                hcaptcha_url: format!("{}/hcaptcha/siteverify", base),
            },
            credentials: Credentials {
                listen_api_key: Some("listen-key".to_string()),
                lastfm_api_key: Some("lastfm-key".to_string()),
                sendgrid_api_key: Some("sendgrid-key".to_string()),
                sendgrid_template_id: Some("d-template".to_string()),
                hcaptcha_secret: Some("hcaptcha-secret".to_string()),
                spotify_client_id: Some("spotify-id".to_string()),
                spotify_client_secret: Some("spotify-secret".to_string()),
            },
            code_ttl: Duration::seconds(DEFAULT_CODE_TTL_SECONDS),
        }
    }
}
