//! Store of email verification codes keyed by verification session id.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::verification::StoreEmailCodeDto,
    server::{
        data::verification_code::VerificationCodeRepository,
        error::{verification::VerificationError, AppError},
    },
};

/// Maximum age, in milliseconds, of the client timestamp sent with a code.
pub const CODE_SUBMISSION_WINDOW_MS: i64 = 30_000;

pub struct EmailCodeService<'a> {
    db: &'a DatabaseConnection,
    ttl: Duration,
}

impl<'a> EmailCodeService<'a> {
    /// # Arguments
    /// - `db` - Database connection
    /// - `ttl` - Age after which a stored code is no longer returned
    pub fn new(db: &'a DatabaseConnection, ttl: Duration) -> Self {
        Self { db, ttl }
    }

    /// Stores a code for its session, replacing any earlier one.
    ///
    /// # Returns
    /// - `Ok(())` - Code stored
    /// - `Err(BadRequest)` - `session`, `code` or `timestamp` missing or empty
    /// - `Err(VerificationErr(RequestExpired))` - `timestamp` older than 30 seconds
    /// - `Err(DbErr)` - Database error
    pub async fn store(
        &self,
        request: StoreEmailCodeDto,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let session = request.session.filter(|s| !s.is_empty());
        let code = request.code.filter(|c| !c.is_empty());
        let timestamp = request.timestamp.filter(|t| *t != 0);

        let (Some(session), Some(code), Some(timestamp)) = (session, code, timestamp) else {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        };

        let within_window = now
            .timestamp_millis()
            .checked_sub(timestamp)
            .is_some_and(|age| age <= CODE_SUBMISSION_WINDOW_MS);
        if !within_window {
            return Err(VerificationError::RequestExpired.into());
        }

        VerificationCodeRepository::new(self.db)
            .upsert(&session, &code, now)
            .await?;

        Ok(())
    }

    /// Returns the code stored for `session`.
    ///
    /// # Returns
    /// - `Ok(code)` - A code younger than the TTL exists
    /// - `Err(BadRequest)` - `session` missing or empty
    /// - `Err(NotFound)` - No code stored, or the stored code outlived the TTL, in which
    ///   case it is deleted
    /// - `Err(DbErr)` - Database error
    pub async fn get(&self, session: Option<&str>, now: DateTime<Utc>) -> Result<String, AppError> {
        let Some(session) = session.filter(|s| !s.is_empty()) else {
            return Err(AppError::BadRequest("Missing session".to_string()));
        };

        let repo = VerificationCodeRepository::new(self.db);

        match repo.find(session).await? {
            Some(stored) if !stored.is_expired(now, self.ttl) => Ok(stored.code),
            Some(_) => {
                repo.delete(session).await?;
                tracing::debug!("Dropped expired email code for session {}", session);

                Err(AppError::NotFound("Code not found".to_string()))
            }
            None => Err(AppError::NotFound("Code not found".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn request(session: &str, code: &str, timestamp: i64) -> StoreEmailCodeDto {
        StoreEmailCodeDto {
            session: Some(session.to_string()),
            code: Some(code.to_string()),
            timestamp: Some(timestamp),
        }
    }

    /// Tests storing a code and reading it back for the same session only.
    ///
    /// Expected: Ok("AB12CD") for "abc", NotFound for "xyz"
    #[tokio::test]
    async fn stores_and_returns_code() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_verification_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = EmailCodeService::new(db, Duration::minutes(10));
        let now = Utc::now();

        service
            .store(request("abc", "AB12CD", now.timestamp_millis()), now)
            .await?;

        assert_eq!(service.get(Some("abc"), now).await?, "AB12CD");
        assert!(matches!(
            service.get(Some("xyz"), now).await,
            Err(AppError::NotFound(msg)) if msg == "Code not found"
        ));

        Ok(())
    }

    /// Tests that a submission with a stale timestamp is rejected and nothing is stored.
    ///
    /// Expected: Err(RequestExpired), then NotFound on read
    #[tokio::test]
    async fn rejects_stale_timestamp() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_verification_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = EmailCodeService::new(db, Duration::minutes(10));
        let now = Utc::now();

        let result = service
            .store(
                request("abc", "AB12CD", now.timestamp_millis() - 30_001),
                now,
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::VerificationErr(VerificationError::RequestExpired))
        ));
        assert!(service.get(Some("abc"), now).await.is_err());

        Ok(())
    }

    /// Tests that a timestamp exactly at the window edge is still accepted.
    ///
    /// Expected: Ok
    #[tokio::test]
    async fn accepts_timestamp_at_window_edge() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_verification_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = EmailCodeService::new(db, Duration::minutes(10));
        let now = Utc::now();

        service
            .store(
                request("abc", "AB12CD", now.timestamp_millis() - CODE_SUBMISSION_WINDOW_MS),
                now,
            )
            .await?;

        Ok(())
    }

    /// Tests that empty or absent fields are reported as missing.
    ///
    /// Expected: Err(BadRequest("Missing required fields"))
    #[tokio::test]
    async fn rejects_missing_fields() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_verification_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = EmailCodeService::new(db, Duration::minutes(10));
        let now = Utc::now();

        let requests = [
            request("", "AB12CD", now.timestamp_millis()),
            request("abc", "", now.timestamp_millis()),
            request("abc", "AB12CD", 0),
            StoreEmailCodeDto::default(),
        ];

        for request in requests {
            let result = service.store(request, now).await;
            assert!(matches!(
                result,
                Err(AppError::BadRequest(msg)) if msg == "Missing required fields"
            ));
        }

        Ok(())
    }

    /// Tests that a code older than the TTL is no longer returned and is removed.
    ///
    /// Expected: Err(NotFound), row deleted
    #[tokio::test]
    async fn hides_codes_past_ttl() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_verification_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let now = Utc::now();

        factory::verification_code::VerificationCodeFactory::new(db)
            .session("abc")
            .created_at(now - Duration::minutes(11))
            .build()
            .await?;

        let service = EmailCodeService::new(db, Duration::minutes(10));

        assert!(matches!(
            service.get(Some("abc"), now).await,
            Err(AppError::NotFound(_))
        ));
        assert!(VerificationCodeRepository::new(db)
            .find("abc")
            .await?
            .is_none());

        Ok(())
    }

    /// Tests that timestamps too far in the past to subtract are treated as expired.
    ///
    /// Expected: Err(RequestExpired), nothing stored
    #[tokio::test]
    async fn rejects_out_of_range_timestamp() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_verification_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = EmailCodeService::new(db, Duration::minutes(10));
        let now = Utc::now();

        let result = service.store(request("abc", "AB12CD", i64::MIN), now).await;

        assert!(matches!(
            result,
            Err(AppError::VerificationErr(VerificationError::RequestExpired))
        ));
        assert!(VerificationCodeRepository::new(db)
            .find("abc")
            .await?
            .is_none());

        Ok(())
    }

    /// Tests that a missing session parameter is a bad request.
    ///
    /// Expected: Err(BadRequest("Missing session"))
    #[tokio::test]
    async fn requires_session_parameter() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_verification_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = EmailCodeService::new(db, Duration::minutes(10));

        for session in [None, Some("")] {
            assert!(matches!(
                service.get(session, Utc::now()).await,
                Err(AppError::BadRequest(msg)) if msg == "Missing session"
            ));
        }

        Ok(())
    }
}
