//! Login payloads used to obtain a bearer token.

use saveme_core::types::UserId;
use serde::{Deserialize, Serialize};

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Successful login reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT to send as a bearer token.
    pub token: String,
    /// Token scheme, always `Bearer` in practice.
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,
    /// The authenticated user.
    pub id: UserId,
    /// The authenticated user's name.
    pub username: String,
    /// The authenticated user's email.
    pub email: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}
