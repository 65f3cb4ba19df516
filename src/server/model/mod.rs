//! Server-side domain models.
//!
//! Domain models used by the service layer: the user carried in the session, payloads
//! exchanged with the bot API, and records of the verification stores converted from
//! SeaORM entities at the repository boundary.

pub mod mail;
pub mod music;
pub mod session;
pub mod store;
pub mod verification;
