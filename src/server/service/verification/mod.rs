//! Guild verification flow.
//!
//! Verification is driven by the bot API, which owns guild configuration and verification
//! sessions. This service forwards the session user's requests and adds the parts the bot
//! API leaves to the dashboard: generating and mailing email codes, throttling sends per
//! address, and checking hCaptcha tokens.

pub mod attempts;
pub mod captcha;
pub mod code;
pub mod email;
pub mod start;
pub mod status;
pub mod verify;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config, model::session::SessionUser, service::upstream::BotApi, state::AppState,
};

pub struct VerificationService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    config: &'a Config,
    user: &'a SessionUser,
}

impl<'a> VerificationService<'a> {
    pub fn new(state: &'a AppState, user: &'a SessionUser) -> Self {
        Self {
            db: &state.db,
            http_client: &state.http_client,
            config: &state.config,
            user,
        }
    }

    fn api(&self) -> BotApi<'a> {
        BotApi::new(
            self.http_client,
            &self.config.upstream.evict_api_url,
            &self.user.token,
        )
    }
}

#[cfg(test)]
mod test;
