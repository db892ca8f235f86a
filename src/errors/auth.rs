use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication and account-management error types
///
/// One variant per failure kind of the login and reset flows; the HTTP
/// mapping lives with the taxonomy.
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// No account matched the given username or email
    #[oai(status = 404)]
    NotFound(Json<AuthErrorResponse>),

    /// Password verification failed
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// The account must complete a password reset before logging in
    #[oai(status = 403)]
    PasswordResetRequired(Json<AuthErrorResponse>),

    /// The account is locked out until a future timestamp
    #[oai(status = 403)]
    AccountDisabled(Json<AuthErrorResponse>),

    /// Invalid or expired session token
    #[oai(status = 401)]
    InvalidToken(Json<AuthErrorResponse>),

    /// The underlying store operation failed (e.g. invalid reset artifact)
    #[oai(status = 400)]
    InvalidOperation(Json<AuthErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthError {
    /// Create a NotFound error
    pub fn not_found() -> Self {
        AuthError::NotFound(Json(AuthErrorResponse {
            error: "not_found".to_string(),
            message: "Account not found".to_string(),
            status_code: 404,
        }))
    }

    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(AuthErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid username or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create a PasswordResetRequired error
    pub fn password_reset_required() -> Self {
        AuthError::PasswordResetRequired(Json(AuthErrorResponse {
            error: "password_reset_required".to_string(),
            message: "A password reset is required before logging in".to_string(),
            status_code: 403,
        }))
    }

    /// Create an AccountDisabled error
    pub fn account_disabled() -> Self {
        AuthError::AccountDisabled(Json(AuthErrorResponse {
            error: "account_disabled".to_string(),
            message: "The account is locked out".to_string(),
            status_code: 403,
        }))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(AuthErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or expired session token".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        AuthError::InvalidOperation(Json(AuthErrorResponse {
            error: "invalid_operation".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: impl Into<String>) -> Self {
        AuthError::InternalError(Json(AuthErrorResponse {
            error: "internal_error".to_string(),
            message: message.into(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::NotFound(json) => json.0.message.clone(),
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::PasswordResetRequired(json) => json.0.message.clone(),
            AuthError::AccountDisabled(json) => json.0.message.clone(),
            AuthError::InvalidToken(json) => json.0.message.clone(),
            AuthError::InvalidOperation(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
