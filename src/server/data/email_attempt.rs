//! Email attempt repository backing the verification email throttle.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::server::model::store::EmailAttempt;

/// Repository providing database operations for per-email send counters.
pub struct EmailAttemptRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmailAttemptRepository<'a> {
    /// Creates a new EmailAttemptRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the counter for an email address.
    ///
    /// # Returns
    /// - `Ok(Some(EmailAttempt))` - The address has received at least one email
    /// - `Ok(None)` - No email was ever recorded for the address
    /// - `Err(DbErr)` - Database error during query
    pub async fn find(&self, email: &str) -> Result<Option<EmailAttempt>, DbErr> {
        let entity = entity::prelude::EmailAttempt::find_by_id(email.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(EmailAttempt::from_entity))
    }

    /// Writes the counter for an email address, replacing any existing row.
    ///
    /// # Arguments
    /// - `email` - Address the counter belongs to
    /// - `count` - Sends within the current window
    /// - `last_attempt_at` - Time of the most recent send
    ///
    /// # Returns
    /// - `Ok(EmailAttempt)` - The stored counter
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(
        &self,
        email: &str,
        count: i32,
        last_attempt_at: DateTime<Utc>,
    ) -> Result<EmailAttempt, DbErr> {
        let entity = entity::prelude::EmailAttempt::insert(entity::email_attempt::ActiveModel {
            email: ActiveValue::Set(email.to_string()),
            count: ActiveValue::Set(count),
            last_attempt_at: ActiveValue::Set(last_attempt_at),
        })
        .on_conflict(
            OnConflict::column(entity::email_attempt::Column::Email)
                .update_columns([
                    entity::email_attempt::Column::Count,
                    entity::email_attempt::Column::LastAttemptAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(EmailAttempt::from_entity(entity))
    }

    /// Deletes counters whose last send happened before `cutoff`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::EmailAttempt::delete_many()
            .filter(entity::email_attempt::Column::LastAttemptAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
