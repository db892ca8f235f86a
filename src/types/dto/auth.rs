use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username or email address of the account
    pub user_name: String,

    /// Password for authentication
    pub password: String,
}

/// Response model containing a session token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed JWT session token
    pub token: String,

    /// Token expiry (Unix timestamp)
    pub expires: i64,
}

/// Request model for initiating a password reset
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    /// Username or email address of the account
    pub user_name: String,
}

/// Response model carrying a single-use reset artifact
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PasswordResetTokenResponse {
    /// Single-use reset token to present on confirmation
    pub reset_token: String,
}

/// Request model for completing a password reset
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PasswordResetConfirmRequest {
    /// Username or email address of the account
    pub user_name: String,

    /// Reset token obtained from the reset request
    pub token: String,

    /// New password to set
    pub new_password: String,
}

/// Response model for whoami endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// Account ID (UUID)
    pub account_id: String,

    /// Username of the account
    pub username: String,

    /// Full display name
    pub full_name: String,

    /// Names of the roles assigned to the account
    pub roles: Vec<String>,

    /// Token expiration time (Unix timestamp)
    pub expires_at: i64,
}

/// Generic success message
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Success message
    pub message: String,
}
