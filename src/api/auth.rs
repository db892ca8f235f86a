use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};
use std::sync::Arc;

use crate::errors::AuthError;
use crate::services::AccountService;
use crate::types::dto::auth::{
    LoginRequest, MessageResponse, PasswordResetConfirmRequest, PasswordResetRequest,
    PasswordResetTokenResponse, TokenResponse, WhoAmIResponse,
};

/// Authentication API endpoints
pub struct AuthApi {
    account_service: Arc<AccountService>,
}

impl AuthApi {
    /// Create a new AuthApi backed by the given AccountService
    pub fn new(account_service: Arc<AccountService>) -> Self {
        Self { account_service }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT")]
pub struct BearerAuth(Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with username or email and password to receive a session token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let issued = self
            .account_service
            .login(&body.user_name, &body.password, None)
            .await?;

        Ok(Json(TokenResponse {
            token: issued.token,
            expires: issued.expires,
        }))
    }

    /// Request a single-use password-reset token
    #[oai(
        path = "/password-reset/request",
        method = "post",
        tag = "AuthTags::Authentication"
    )]
    async fn request_password_reset(
        &self,
        body: Json<PasswordResetRequest>,
    ) -> Result<Json<PasswordResetTokenResponse>, AuthError> {
        let reset_token = self
            .account_service
            .request_password_reset(&body.user_name)
            .await?;

        Ok(Json(PasswordResetTokenResponse { reset_token }))
    }

    /// Confirm a password reset with the token from the reset request
    #[oai(
        path = "/password-reset/confirm",
        method = "post",
        tag = "AuthTags::Authentication"
    )]
    async fn confirm_password_reset(
        &self,
        body: Json<PasswordResetConfirmRequest>,
    ) -> Result<Json<MessageResponse>, AuthError> {
        self.account_service
            .reset_password(&body.user_name, &body.token, &body.new_password)
            .await?;

        Ok(Json(MessageResponse {
            message: "Password reset successfully".to_string(),
        }))
    }

    /// Verify a session token and return the identity it carries
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, auth: BearerAuth) -> Result<Json<WhoAmIResponse>, AuthError> {
        let claims = self.account_service.validate_token(&auth.0.token)?;

        Ok(Json(WhoAmIResponse {
            account_id: claims.sub,
            username: claims.unique_name,
            full_name: claims.name,
            roles: claims.roles,
            expires_at: claims.exp,
        }))
    }
}
