use crate::server::data::verification_code::VerificationCodeRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod find;
mod upsert;
