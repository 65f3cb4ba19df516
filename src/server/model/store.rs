//! Records of the verification stores.

use chrono::{DateTime, Duration, Utc};

/// Sends the throttle allows per email within one window.
pub const MAX_EMAIL_ATTEMPTS: i32 = 5;

/// Length of the rolling window after which the send counter resets.
pub fn attempt_window() -> Duration {
    Duration::hours(24)
}

/// Verification emails sent to one address.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttempt {
    pub email: String,
    pub count: i32,
    pub last_attempt_at: DateTime<Utc>,
}

impl EmailAttempt {
    /// An address that never received a verification email.
    pub fn fresh(email: &str) -> Self {
        Self {
            email: email.to_string(),
            count: 0,
            last_attempt_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub fn from_entity(entity: entity::email_attempt::Model) -> Self {
        Self {
            email: entity.email,
            count: entity.count,
            last_attempt_at: entity.last_attempt_at,
        }
    }

    /// Returns the record as seen at `now`: the counter restarts at zero once more than
    /// a full window has passed since the last send.
    pub fn at(self, now: DateTime<Utc>) -> Self {
        if now.signed_duration_since(self.last_attempt_at) > attempt_window() {
            Self { count: 0, ..self }
        } else {
            self
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.count >= MAX_EMAIL_ATTEMPTS
    }
}

/// Email verification code keyed by the bot API's verification session.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCode {
    pub session: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl StoredCode {
    pub fn from_entity(entity: entity::verification_code::Model) -> Self {
        Self {
            session: entity.session,
            code: entity.code,
            created_at: entity.created_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.created_at) > ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_keeps_count_inside_window() {
        let now = Utc::now();
        let attempt = EmailAttempt {
            email: "a@example.com".to_string(),
            count: 3,
            last_attempt_at: now - Duration::hours(23),
        };

        assert_eq!(attempt.at(now).count, 3);
    }

    #[test]
    fn attempt_resets_after_window() {
        let now = Utc::now();
        let attempt = EmailAttempt {
            email: "a@example.com".to_string(),
            count: 5,
            last_attempt_at: now - Duration::hours(24) - Duration::seconds(1),
        };

        let attempt = attempt.at(now);
        assert_eq!(attempt.count, 0);
        assert!(!attempt.is_exhausted());
    }

    #[test]
    fn fifth_send_exhausts_window() {
        let mut attempt = EmailAttempt::fresh("a@example.com");
        attempt.count = MAX_EMAIL_ATTEMPTS;

        assert!(attempt.is_exhausted());
    }

    #[test]
    fn code_expires_after_ttl() {
        let now = Utc::now();
        let code = StoredCode {
            session: "abc".to_string(),
            code: "AB12CD".to_string(),
            created_at: now - Duration::minutes(11),
        };

        assert!(code.is_expired(now, Duration::minutes(10)));
        assert!(!code.is_expired(now, Duration::minutes(15)));
    }
}
