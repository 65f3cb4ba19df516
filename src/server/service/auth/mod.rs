//! OAuth2 login with Discord

use crate::server::state::OAuth2Client;

pub mod callback;
pub mod login;

pub struct DiscordAuthService<'a> {
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
    /// Base of the Discord REST API, e.g. `https://discord.com/api`.
    pub api_url: &'a str,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        api_url: &'a str,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            api_url,
        }
    }
}
