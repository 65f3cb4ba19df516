//! Factory methods for creating test data.
//!
//! Each table has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let attempt = factory::email_attempt::EmailAttemptFactory::new(&db)
//!     .email("user@example.com")
//!     .count(5)
//!     .build()
//!     .await?;
//! ```

pub mod email_attempt;
pub mod helpers;
pub mod verification_code;
