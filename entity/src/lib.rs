//! SeaORM entity models for the dashboard's short-lived verification state.

pub mod email_attempt;
pub mod prelude;
pub mod verification_code;
