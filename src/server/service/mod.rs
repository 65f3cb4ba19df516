//! Service layer for upstream forwarding and orchestration.
//!
//! Services sit between the controllers and the outside world. They are responsible for:
//!
//! - **Validation**: Rejecting incomplete input before any outbound call
//! - **Forwarding**: Calling the bot API with the session user's bearer token
//! - **Orchestration**: Combining several providers into one response (music search,
//!   the verification email flow)
//! - **Persistence**: Using the repositories for the verification stores

pub mod auth;
pub mod beta;
pub mod music;
pub mod upstream;
pub mod verification;
