use serde_json::Value;

use crate::server::{error::AppError, service::verification::VerificationService};

impl<'a> VerificationService<'a> {
    /// Fetches a guild's verification status and relays it as is.
    ///
    /// # Returns
    /// - `Ok(Value)` - Status JSON from the bot API
    /// - `Err(InternalError)` - The bot API answered with a non-success status
    /// - `Err(ReqwestErr)` - The bot API could not be reached or sent invalid JSON
    pub async fn status(&self, guild_id: &str) -> Result<Value, AppError> {
        let response = self
            .api()
            .get(&format!("verification/status/{}", guild_id))
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::InternalError(format!(
                "Failed to fetch verification status for guild {}: {}",
                guild_id, status
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}
