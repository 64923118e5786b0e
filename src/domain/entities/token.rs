use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AuthError;

/// Access token claims issued by the identity service.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn requester_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::InvalidUserId)
    }
}
