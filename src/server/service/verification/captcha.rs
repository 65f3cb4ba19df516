//! hCaptcha token verification.

use crate::server::{
    config::{require_credential, Config},
    error::AppError,
    model::verification::CaptchaVerdict,
};

pub struct CaptchaVerifier<'a> {
    http_client: &'a reqwest::Client,
    url: &'a str,
    secret: &'a str,
}

impl<'a> CaptchaVerifier<'a> {
    pub fn from_config(
        http_client: &'a reqwest::Client,
        config: &'a Config,
    ) -> Result<Self, AppError> {
        let secret =
            require_credential(&config.credentials.hcaptcha_secret, "HCAPTCHA_SECRET_KEY")?;

        Ok(Self {
            http_client,
            url: &config.upstream.hcaptcha_url,
            secret,
        })
    }

    /// Asks hCaptcha whether `token` was solved.
    ///
    /// The verdict is returned as is; an unsolved token is not an error here, the bot API
    /// decides what to do with `success: false`.
    pub async fn verify(&self, token: &str) -> Result<CaptchaVerdict, AppError> {
        let verdict = self
            .http_client
            .post(self.url)
            .form(&[("secret", self.secret), ("response", token)])
            .send()
            .await?
            .json::<CaptchaVerdict>()
            .await?;

        Ok(verdict)
    }
}
