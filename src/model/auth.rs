use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The currently logged in user as exposed to the browser.
///
/// The bearer token held in the session is never part of this DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}
