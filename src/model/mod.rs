//! Request and response DTOs exchanged with the browser.

pub mod api;
pub mod auth;
pub mod beta;
pub mod music;
pub mod verification;
