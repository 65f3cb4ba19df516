//! HTTP handlers.
//!
//! Every handler runs the session guard first, so unauthenticated requests are rejected
//! before input validation or any upstream call. Failures are then mapped onto the
//! route's error body with `AppError::failed_with` or `AppError::failed_as_text`.

pub mod auth;
pub mod beta;
pub mod music;
pub mod verification;

#[cfg(test)]
mod test;
