use crate::server::data::email_attempt::EmailAttemptRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete_older_than;
mod find;
mod upsert;
