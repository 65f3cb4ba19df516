use chrono::{DateTime, NaiveDateTime, Utc};
use rand::Rng;
use reqwest::Response;
use serde_json::Value;

use crate::{
    model::verification::StartedVerificationDto,
    server::{
        error::{upstream::UpstreamError, verification::VerificationError, AppError},
        model::{
            mail::VerificationEmail,
            store::EmailAttempt,
            verification::{
                GuildVerificationStatus, StartOutcome, StartRequest, StartedSession,
                UpstreamEmailCode, VerificationMethod,
            },
        },
        service::{
            upstream::error_body,
            verification::{
                attempts::EmailAttemptService, email::EmailSender, VerificationService,
            },
        },
    },
};

/// Error the bot API returns when asked to start a session for a verified member.
const UPSTREAM_ALREADY_VERIFIED: &str = "User is already verified";

/// Fallback error code when the bot API does not name one.
const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Generates an email verification code: 6 random bytes as 12 uppercase hex digits.
pub fn generate_code() -> String {
    let mut bytes = [0u8; 6];
    rand::rng().fill(&mut bytes);

    hex::encode_upper(bytes)
}

/// Renders the session expiry for the email body.
///
/// RFC 3339 strings, naive ISO timestamps (taken as UTC) and epoch milliseconds are
/// formatted; anything else is passed through as text.
pub fn display_expiry(expires_at: &Value) -> String {
    let parsed = match expires_at {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .map(|date| date.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|date| date.and_utc())
                    .ok()
            }),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };

    match (parsed, expires_at) {
        (Some(date), _) => date.format("%B %-d, %Y %H:%M UTC").to_string(),
        (None, Value::String(text)) => text.clone(),
        (None, Value::Null) => String::new(),
        (None, other) => other.to_string(),
    }
}

/// Email to send once the bot API has opened the session.
struct PendingEmail<'e> {
    to: &'e str,
    attempt: EmailAttempt,
    code: String,
}

impl<'a> VerificationService<'a> {
    /// Starts verifying the session user in `guild_id`.
    ///
    /// The guild's configured method decides the flow. Questions relay the bot API's start
    /// response. Email additionally generates a code, registers it with the bot API and
    /// mails it to the session user, subject to the per-address send limit, which is
    /// checked before the bot API opens a session.
    ///
    /// # Returns
    /// - `Ok(StartOutcome)` - Session started
    /// - `Err(VerificationErr(AlreadyVerified))` - Member already verified
    /// - `Err(VerificationErr(TooManyAttempts))` - Email send limit reached
    /// - `Err(UpstreamErr)` - Bot API rejected a request; its status and error are relayed
    /// - `Err(_)` - Any other failure
    pub async fn start(&self, guild_id: &str, user_id: &str) -> Result<StartOutcome, AppError> {
        let guild = self.guild_status(guild_id).await?;

        if guild.verified {
            return Err(VerificationError::AlreadyVerified.into());
        }

        let method = guild.verification.method.kind.clone();

        if method == VerificationMethod::Questions {
            let response = self.open_session(guild_id, user_id, method).await?;

            return Ok(StartOutcome::Relayed(response.json::<Value>().await?));
        }

        let pending = match method {
            VerificationMethod::Email => Some(self.prepare_email().await?),
            _ => None,
        };

        let started = self
            .open_session(guild_id, user_id, method)
            .await?
            .json::<StartedSession>()
            .await?;

        if let Some(pending) = pending {
            self.deliver_code(&guild, &started, pending).await?;
        }

        Ok(StartOutcome::Started(StartedVerificationDto {
            session: started.session,
            expires_at: started.expires_at,
        }))
    }

    async fn guild_status(&self, guild_id: &str) -> Result<GuildVerificationStatus, AppError> {
        let response = self
            .api()
            .get(&format!("verification/status/{}", guild_id))
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            let error = body.error.unwrap_or_else(|| INTERNAL_ERROR.to_string());

            return Err(UpstreamError::error(status, error).into());
        }

        Ok(response.json::<GuildVerificationStatus>().await?)
    }

    async fn open_session(
        &self,
        guild_id: &str,
        user_id: &str,
        method: VerificationMethod,
    ) -> Result<Response, AppError> {
        let response = self
            .api()
            .post(
                &format!("verification/start/{}/{}", guild_id, user_id),
                &StartRequest { kind: method },
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = error_body(response).await;
        match body.error {
            Some(error) if error == UPSTREAM_ALREADY_VERIFIED => {
                Err(VerificationError::AlreadyVerified.into())
            }
            error => Err(UpstreamError::error(
                status,
                error.unwrap_or_else(|| INTERNAL_ERROR.to_string()),
            )
            .into()),
        }
    }

    /// Checks the send limit for the session user's address and generates the code.
    async fn prepare_email(&self) -> Result<PendingEmail<'a>, AppError> {
        let Some(to) = self.user.email.as_deref().filter(|email| !email.is_empty()) else {
            return Err(VerificationError::MissingEmail.into());
        };

        let attempt = EmailAttemptService::new(self.db)
            .check(to, Utc::now())
            .await?;

        Ok(PendingEmail {
            to,
            attempt,
            code: generate_code(),
        })
    }

    /// Registers the code with the bot API, mails it, then counts the send.
    async fn deliver_code(
        &self,
        guild: &GuildVerificationStatus,
        started: &StartedSession,
        pending: PendingEmail<'_>,
    ) -> Result<(), AppError> {
        let response = self
            .api()
            .post(
                "verification/email/code",
                &UpstreamEmailCode {
                    session: &started.session,
                    code: &pending.code,
                    timestamp: Utc::now().timestamp_millis(),
                },
            )
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                "Bot API answered {} when registering the email code for session {}",
                response.status(),
                started.session
            );
        }

        let email = VerificationEmail {
            to: pending.to,
            code: &pending.code,
            guild_name: guild.guild_name.as_deref().unwrap_or_default(),
            user_name: &self.user.name,
            expires_at: display_expiry(&started.expires_at),
        };
        EmailSender::from_config(self.http_client, self.config)?
            .send_verification(&email)
            .await?;

        EmailAttemptService::new(self.db)
            .record(pending.attempt, Utc::now())
            .await?;

        Ok(())
    }
}
