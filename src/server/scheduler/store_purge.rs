use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{
        email_attempt::EmailAttemptRepository, verification_code::VerificationCodeRepository,
    },
    error::AppError,
    model::store::attempt_window,
};

/// Starts the verification store purge scheduler
///
/// Runs every 10 minutes and deletes:
/// - Email codes older than `code_ttl`
/// - Email attempt counters whose window has passed
///
/// # Arguments
/// - `db`: Database connection
/// - `code_ttl`: Age after which stored email codes are no longer served
pub async fn start_scheduler(db: DatabaseConnection, code_ttl: Duration) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job = Job::new_async("0 */10 * * * *", move |_uuid, _lock| {
        let db = job_db.clone();

        Box::pin(async move {
            if let Err(e) = purge_expired(&db, code_ttl).await {
                tracing::error!("Error purging verification stores: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Verification store purge scheduler started");

    Ok(())
}

/// Deletes expired store rows, returning the number of codes and counters removed.
pub async fn purge_expired(
    db: &DatabaseConnection,
    code_ttl: Duration,
) -> Result<(u64, u64), AppError> {
    let now = Utc::now();

    let codes = VerificationCodeRepository::new(db)
        .delete_older_than(now - code_ttl)
        .await?;
    let attempts = EmailAttemptRepository::new(db)
        .delete_older_than(now - attempt_window())
        .await?;

    if codes > 0 || attempts > 0 {
        tracing::debug!(
            "Purged {} expired codes and {} email attempt counters",
            codes,
            attempts
        );
    }

    Ok((codes, attempts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests that the purge removes only expired rows from both stores.
    ///
    /// Expected: Ok((1, 1)) with the fresh rows kept
    #[tokio::test]
    async fn purges_expired_rows_from_both_stores() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_verification_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let now = Utc::now();

        factory::verification_code::VerificationCodeFactory::new(db)
            .session("old")
            .created_at(now - Duration::minutes(20))
            .build()
            .await?;
        factory::verification_code::create_code(db, "new", "AB12CD").await?;
        factory::email_attempt::EmailAttemptFactory::new(db)
            .email("old@example.com")
            .last_attempt_at(now - Duration::hours(30))
            .build()
            .await?;
        factory::email_attempt::create_attempt(db, "new@example.com", 2).await?;

        let removed = purge_expired(db, Duration::minutes(10)).await?;

        assert_eq!(removed, (1, 1));
        assert!(VerificationCodeRepository::new(db).find("new").await?.is_some());
        assert!(EmailAttemptRepository::new(db)
            .find("new@example.com")
            .await?
            .is_some());

        Ok(())
    }
}
