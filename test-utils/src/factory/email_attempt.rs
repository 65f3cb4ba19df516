//! Email attempt factory for seeding send-throttle rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating `email_attempt` rows with customizable fields.
///
/// Defaults:
/// - email: `"user{id}@example.com"`
/// - count: `1`
/// - last_attempt_at: now
pub struct EmailAttemptFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    count: i32,
    last_attempt_at: DateTime<Utc>,
}

impl<'a> EmailAttemptFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            email: format!("user{}@example.com", next_id()),
            count: 1,
            last_attempt_at: Utc::now(),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn count(mut self, count: i32) -> Self {
        self.count = count;
        self
    }

    pub fn last_attempt_at(mut self, last_attempt_at: DateTime<Utc>) -> Self {
        self.last_attempt_at = last_attempt_at;
        self
    }

    /// Inserts the row and returns the stored model.
    pub async fn build(self) -> Result<entity::email_attempt::Model, DbErr> {
        entity::email_attempt::ActiveModel {
            email: ActiveValue::Set(self.email),
            count: ActiveValue::Set(self.count),
            last_attempt_at: ActiveValue::Set(self.last_attempt_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an attempt row for `email` with the given count, last attempted now.
pub async fn create_attempt(
    db: &DatabaseConnection,
    email: &str,
    count: i32,
) -> Result<entity::email_attempt::Model, DbErr> {
    EmailAttemptFactory::new(db)
        .email(email)
        .count(count)
        .build()
        .await
}
