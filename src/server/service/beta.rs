//! Beta role applications.

use serde::Serialize;

use crate::{
    model::beta::BetaApplicationDto,
    server::{
        error::{upstream::UpstreamError, AppError},
        service::upstream::BotApi,
    },
};

/// The application as forwarded to `POST /roles/apply`. Only these fields are relayed.
#[derive(Serialize)]
struct RoleApplication<'a> {
    role_id: &'a Option<serde_json::Value>,
    display_name: &'a Option<String>,
    description: &'a Option<String>,
    discord_id: &'a Option<serde_json::Value>,
    email: &'a Option<String>,
}

pub struct BetaService<'a> {
    api: BotApi<'a>,
}

impl<'a> BetaService<'a> {
    pub fn new(api: BotApi<'a>) -> Self {
        Self { api }
    }

    /// Submits a beta application on behalf of the session user.
    ///
    /// # Returns
    /// - `Ok(())` - The bot API accepted the application
    /// - `Err(UpstreamErr)` - Bot API rejected it; its status is relayed with
    ///   `Failed to submit application`
    /// - `Err(Failed)` - The bot API could not be reached (`Failed to contact API`)
    pub async fn apply(&self, application: &BetaApplicationDto) -> Result<(), AppError> {
        let body = RoleApplication {
            role_id: &application.role_id,
            display_name: &application.display_name,
            description: &application.description,
            discord_id: &application.discord_id,
            email: &application.email,
        };

        let response = self
            .api
            .post("roles/apply", &body)
            .await
            .map_err(|e| AppError::from(e).failed_with("Failed to contact API"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!("Beta application rejected with {}: {}", status, text);

            return Err(UpstreamError::error(status, "Failed to submit application").into());
        }

        Ok(())
    }
}

