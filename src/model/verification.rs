use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of `POST /api/verification/email/code`.
///
/// Every field is optional at the type level so that missing fields are reported
/// as "Missing required fields" instead of a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StoreEmailCodeDto {
    pub session: Option<String>,
    pub code: Option<String>,
    /// Client clock in milliseconds since the Unix epoch.
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailCodeQuery {
    pub session: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmailCodeDto {
    pub code: String,
}

/// Response of a started email or captcha verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StartedVerificationDto {
    pub session: String,
    #[schema(value_type = Object)]
    pub expires_at: Value,
}

/// Body of `POST /api/verification/verify/{guild_id}/{user_id}`.
///
/// Exactly one of `answers` (questions), `token` (captcha) or
/// `verification_data.email.code` (email) is expected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VerifyRequestDto {
    #[schema(value_type = Option<Object>)]
    pub session: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub answers: Option<Value>,
    pub token: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub verification_data: Option<Value>,
}
