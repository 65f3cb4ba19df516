pub use super::email_attempt::Entity as EmailAttempt;
pub use super::verification_code::Entity as VerificationCode;
