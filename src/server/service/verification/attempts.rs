//! Per-address throttle for verification emails.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::email_attempt::EmailAttemptRepository,
    error::{verification::VerificationError, AppError},
    model::store::EmailAttempt,
};

pub struct EmailAttemptService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmailAttemptService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the counter for `email` as of `now`, resetting it once the window has passed.
    ///
    /// # Returns
    /// - `Ok(EmailAttempt)` - Another email may be sent
    /// - `Err(VerificationErr(TooManyAttempts))` - The address used up its sends
    /// - `Err(DbErr)` - Database error
    pub async fn check(&self, email: &str, now: DateTime<Utc>) -> Result<EmailAttempt, AppError> {
        let repo = EmailAttemptRepository::new(self.db);

        let attempt = repo
            .find(email)
            .await?
            .unwrap_or_else(|| EmailAttempt::fresh(email))
            .at(now);

        if attempt.is_exhausted() {
            tracing::debug!("Verification email throttled for {}", email);
            return Err(VerificationError::TooManyAttempts.into());
        }

        Ok(attempt)
    }

    /// Counts one more send on a counter returned by [`Self::check`].
    pub async fn record(
        &self,
        attempt: EmailAttempt,
        now: DateTime<Utc>,
    ) -> Result<EmailAttempt, AppError> {
        let repo = EmailAttemptRepository::new(self.db);

        Ok(repo.upsert(&attempt.email, attempt.count + 1, now).await?)
    }
}
