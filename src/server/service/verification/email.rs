//! Verification emails sent through SendGrid.

use crate::server::{
    config::{require_credential, Config},
    error::AppError,
    model::mail::{MailSend, VerificationEmail},
};

pub struct EmailSender<'a> {
    http_client: &'a reqwest::Client,
    url: &'a str,
    api_key: &'a str,
    template_id: &'a str,
}

impl<'a> EmailSender<'a> {
    /// Builds a sender from configuration.
    ///
    /// # Returns
    /// - `Ok(EmailSender)` - SendGrid key and template are configured
    /// - `Err(InternalError)` - `SENDGRID_API_KEY` or `SENDGRID_TEMPLATE_ID` is missing
    pub fn from_config(
        http_client: &'a reqwest::Client,
        config: &'a Config,
    ) -> Result<Self, AppError> {
        Ok(Self {
            http_client,
            url: &config.upstream.sendgrid_url,
            api_key: require_credential(
                &config.credentials.sendgrid_api_key,
                "SENDGRID_API_KEY",
            )?,
            template_id: require_credential(
                &config.credentials.sendgrid_template_id,
                "SENDGRID_TEMPLATE_ID",
            )?,
        })
    }

    pub async fn send_verification(&self, email: &VerificationEmail<'_>) -> Result<(), AppError> {
        self.http_client
            .post(self.url)
            .bearer_auth(self.api_key)
            .json(&MailSend::verification(self.template_id, email))
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("Sent verification code to {}", email.to);

        Ok(())
    }
}
