mod email_attempt;
mod verification_code;
