//! Evict Dashboard Test Utils
//!
//! Shared testing utilities for the dashboard server. This crate offers a builder for
//! creating test contexts backed by in-memory SQLite databases, session helpers bound to
//! the same database, and factories for the verification store tables.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and session store
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Row factories for `email_attempt` and `verification_code`
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_code_store() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_verification_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
