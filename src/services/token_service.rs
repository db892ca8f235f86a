use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::config::JwtSettings;
use crate::errors::AuthError;
use crate::types::db::account;
use crate::types::internal::auth::Claims;

/// Fallback when the configured expiry is zero or negative
const FALLBACK_EXPIRE_MINUTES: i64 = 60;

/// A freshly signed session token with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires: i64,
}

/// Manages session token issuance and validation
pub struct TokenService {
    settings: JwtSettings,
}

impl TokenService {
    /// Create a new TokenService with the given settings
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }

    /// Effective token lifetime in minutes
    pub fn expire_minutes(&self) -> i64 {
        if self.settings.expire_minutes <= 0 {
            FALLBACK_EXPIRE_MINUTES
        } else {
            self.settings.expire_minutes
        }
    }

    /// Issue a signed session token for an account
    ///
    /// Claims carry the account id as subject, the unique name, the full
    /// name, one role entry per assigned role, and the email when present.
    pub fn issue(
        &self,
        account: &account::Model,
        roles: Vec<String>,
    ) -> Result<IssuedToken, AuthError> {
        let now = Utc::now().timestamp();
        let expires = now + self.expire_minutes() * 60;

        let claims = Claims {
            sub: account.id.clone(),
            unique_name: account.username.clone(),
            name: account.full_name.clone(),
            email: account.email.clone(),
            roles,
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            exp: expires,
            iat: now,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken { token, expires })
    }

    /// Validate a session token and return the claims
    ///
    /// Checks signature, expiry, issuer, and audience.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.settings.issuer]);
        validation.set_audience(&[&self.settings.audience]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AuthError::invalid_token())?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("settings", &self.settings)
            .finish()
    }
}
