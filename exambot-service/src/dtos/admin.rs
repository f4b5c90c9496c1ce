use secrecy::Secret;
use serde::{Deserialize, Serialize};

/// Submitted admin credentials. `Debug` never prints the password.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    pub success: bool,
    pub message: String,
    /// Bearer token for the admin-only routes.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}
