//! Verification code factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating `verification_code` rows.
///
/// Defaults:
/// - session: `"session_{id}"`
/// - code: `"A1B2C3D4E5F6"`
/// - created_at: now
pub struct VerificationCodeFactory<'a> {
    db: &'a DatabaseConnection,
    session: String,
    code: String,
    created_at: DateTime<Utc>,
}

impl<'a> VerificationCodeFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            session: format!("session_{}", next_id()),
            code: "A1B2C3D4E5F6".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn session(mut self, session: impl Into<String>) -> Self {
        self.session = session.into();
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::verification_code::Model, DbErr> {
        entity::verification_code::ActiveModel {
            session: ActiveValue::Set(self.session),
            code: ActiveValue::Set(self.code),
            created_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a code row for `session` created now.
pub async fn create_code(
    db: &DatabaseConnection,
    session: &str,
    code: &str,
) -> Result<entity::verification_code::Model, DbErr> {
    VerificationCodeFactory::new(db)
        .session(session)
        .code(code)
        .build()
        .await
}
