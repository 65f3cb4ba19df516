use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Beta role application submitted from the dashboard.
///
/// Fields are forwarded untouched to the bot API, which owns their validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BetaApplicationDto {
    #[schema(value_type = Option<Object>)]
    pub role_id: Option<Value>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub discord_id: Option<Value>,
    pub email: Option<String>,
}
