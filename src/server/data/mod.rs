//! Database repository layer for the verification stores.
//!
//! Repositories use SeaORM entity models internally and return domain models from
//! `server::model::store`, keeping SeaORM types out of the service layer.

pub mod email_attempt;
pub mod verification_code;

#[cfg(test)]
mod test;
