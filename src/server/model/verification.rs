//! Payloads exchanged with the bot API's verification endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::model::verification::StartedVerificationDto;

/// Challenge type a guild requires before granting its verified role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationMethod {
    Questions,
    Email,
    Captcha,
    /// Method unknown to the dashboard, forwarded to the bot API verbatim.
    Other(String),
}

impl From<String> for VerificationMethod {
    fn from(value: String) -> Self {
        match value.as_str() {
            "questions" => Self::Questions,
            "email" => Self::Email,
            "captcha" => Self::Captcha,
            _ => Self::Other(value),
        }
    }
}

impl From<VerificationMethod> for String {
    fn from(value: VerificationMethod) -> Self {
        match value {
            VerificationMethod::Questions => "questions".to_string(),
            VerificationMethod::Email => "email".to_string(),
            VerificationMethod::Captcha => "captcha".to_string(),
            VerificationMethod::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodConfig {
    #[serde(rename = "type")]
    pub kind: VerificationMethod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildVerificationConfig {
    pub method: MethodConfig,
}

/// `GET /verification/status/{guild_id}` as far as the start flow reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildVerificationStatus {
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub guild_name: Option<String>,
    pub verification: GuildVerificationConfig,
}

/// Body of `POST /verification/start/{guild_id}/{user_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct StartRequest {
    #[serde(rename = "type")]
    pub kind: VerificationMethod,
}

/// A verification session opened by the bot API.
#[derive(Debug, Clone, Deserialize)]
pub struct StartedSession {
    pub session: String,
    #[serde(default)]
    pub expires_at: Value,
}

/// Body of the bot API's `POST /verification/email/code`.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamEmailCode<'a> {
    pub session: &'a str,
    pub code: &'a str,
    pub timestamp: i64,
}

/// hCaptcha `siteverify` answer.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptchaVerdict {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub challenge_ts: Option<String>,
}

/// Error body returned by the bot API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub code: Option<Value>,
}

impl UpstreamErrorBody {
    /// Failure body relayed by the answers branch of verify.
    ///
    /// `success` is always `false`; `message`, `error` and `code` are copied when present.
    pub fn into_failure(self) -> Value {
        let mut body = json!({ "success": false });

        let fields = [
            ("message", self.message),
            ("error", self.error.map(Value::String)),
            ("code", self.code),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                body[key] = value;
            }
        }

        body
    }
}

/// Result of starting a verification session.
///
/// The questions method relays the bot API's JSON as is; the other methods answer with
/// the session id and its expiry.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StartOutcome {
    Started(StartedVerificationDto),
    Relayed(Value),
}

/// `POST /verification/verify` body for the questions method.
#[derive(Debug, Serialize)]
pub struct AnswersSubmission<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<&'a Value>,
    pub answers: &'a Value,
}

/// `POST /verification/verify` body for the captcha method.
#[derive(Debug, Serialize)]
pub struct CaptchaSubmission<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<&'a Value>,
    pub token: &'a str,
    pub success: bool,
    pub challenge_ts: Option<String>,
}

/// `POST /verification/verify` body for the email method.
#[derive(Debug, Serialize)]
pub struct EmailSubmission<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<&'a Value>,
    pub code: &'a Value,
}
