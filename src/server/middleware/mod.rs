//! Session access and the guard every API route runs before doing any work.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
