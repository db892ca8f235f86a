use serde::{Deserialize, Serialize};

/// JWT Claims structure
///
/// Carries the account identity plus one role entry per assigned role,
/// mirroring what downstream services authorize on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,

    /// Unique account name
    pub unique_name: String,

    /// Full display name
    pub name: String,

    /// Email address, when the account has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Assigned role names
    #[serde(default)]
    pub roles: Vec<String>,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}
