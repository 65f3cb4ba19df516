//! Verification code repository.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::server::model::store::StoredCode;

/// Repository for email verification codes keyed by verification session id.
pub struct VerificationCodeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VerificationCodeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores `code` for `session`, overwriting a previous code for the same session.
    ///
    /// # Returns
    /// - `Ok(StoredCode)` - The stored record
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(
        &self,
        session: &str,
        code: &str,
        created_at: DateTime<Utc>,
    ) -> Result<StoredCode, DbErr> {
        let entity =
            entity::prelude::VerificationCode::insert(entity::verification_code::ActiveModel {
                session: ActiveValue::Set(session.to_string()),
                code: ActiveValue::Set(code.to_string()),
                created_at: ActiveValue::Set(created_at),
            })
            .on_conflict(
                OnConflict::column(entity::verification_code::Column::Session)
                    .update_columns([
                        entity::verification_code::Column::Code,
                        entity::verification_code::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        Ok(StoredCode::from_entity(entity))
    }

    /// Finds the code stored for `session`, regardless of its age.
    pub async fn find(&self, session: &str) -> Result<Option<StoredCode>, DbErr> {
        let entity = entity::prelude::VerificationCode::find_by_id(session.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(StoredCode::from_entity))
    }

    /// Removes the code stored for `session`, if any.
    pub async fn delete(&self, session: &str) -> Result<(), DbErr> {
        entity::prelude::VerificationCode::delete_by_id(session.to_string())
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes codes created before `cutoff`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::VerificationCode::delete_many()
            .filter(entity::verification_code::Column::CreatedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
