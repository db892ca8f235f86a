use std::sync::Arc;

use chrono::Utc;

use crate::errors::AuthError;
use crate::services::{audit_logger, IssuedToken, TokenService};
use crate::stores::{AccountStore, AuditStore, RoleStore};
use crate::types::internal::auth::Claims;

/// Lifetime of a password-reset artifact
const RESET_ARTIFACT_TTL_MINUTES: i64 = 30;

/// Credential verifier: orchestrates login and password-reset flows
///
/// Coordinates the account store, role store, and token service, with
/// built-in best-effort audit logging.
pub struct AccountService {
    accounts: Arc<AccountStore>,
    roles: Arc<RoleStore>,
    tokens: Arc<TokenService>,
    audit: Arc<AuditStore>,
}

impl AccountService {
    /// Create a new AccountService
    pub fn new(
        accounts: Arc<AccountStore>,
        roles: Arc<RoleStore>,
        tokens: Arc<TokenService>,
        audit: Arc<AuditStore>,
    ) -> Self {
        Self {
            accounts,
            roles,
            tokens,
            audit,
        }
    }

    /// Perform a complete login flow
    ///
    /// Resolution is by exact username first, then by email. Policy gates
    /// are checked in order: forced password reset, lockout, password.
    ///
    /// # Returns
    /// * `Ok(IssuedToken)` - Signed token and its expiry
    /// * `Err(AuthError)` - NotFound, PasswordResetRequired, AccountDisabled,
    ///   or InvalidCredentials
    pub async fn login(
        &self,
        user_name: &str,
        password: &str,
        ip_address: Option<String>,
    ) -> Result<IssuedToken, AuthError> {
        let Some(account) = self.accounts.resolve(user_name).await? else {
            self.audit_failure(None, "account_not_found", ip_address)
                .await;
            return Err(AuthError::not_found());
        };

        // Gate order matters: the reset gate fires regardless of password
        // correctness, then lockout, then the hash check.
        if account.requires_password_reset {
            self.audit_failure(
                Some(account.id.clone()),
                "password_reset_required",
                ip_address,
            )
            .await;
            return Err(AuthError::password_reset_required());
        }

        if let Some(lockout_until) = account.lockout_until {
            if lockout_until > Utc::now().timestamp() {
                self.audit_failure(Some(account.id.clone()), "account_disabled", ip_address)
                    .await;
                return Err(AuthError::account_disabled());
            }
        }

        if !self.accounts.verify_password(&account, password) {
            self.audit_failure(Some(account.id.clone()), "invalid_credentials", ip_address)
                .await;
            return Err(AuthError::invalid_credentials());
        }

        let roles = self.roles.roles_for_account(&account.id).await?;
        let issued = self.tokens.issue(&account, roles)?;

        if let Err(audit_err) =
            audit_logger::log_login_success(&self.audit, &account.id, ip_address).await
        {
            tracing::error!("Failed to log login success: {:?}", audit_err);
        }

        Ok(issued)
    }

    /// Issue a single-use password-reset artifact
    ///
    /// # Returns
    /// * `Ok(String)` - The plaintext artifact for delivery to the caller
    /// * `Err(AuthError)` - NotFound if the account is unresolved
    pub async fn request_password_reset(&self, user_name: &str) -> Result<String, AuthError> {
        let Some(account) = self.accounts.resolve(user_name).await? else {
            return Err(AuthError::not_found());
        };

        let artifact = self
            .accounts
            .issue_reset_artifact(&account, RESET_ARTIFACT_TTL_MINUTES)
            .await?;

        if let Err(audit_err) =
            audit_logger::log_password_reset_requested(&self.audit, &account.id).await
        {
            tracing::error!("Failed to log password reset request: {:?}", audit_err);
        }

        Ok(artifact)
    }

    /// Consume a reset artifact and set a new password
    ///
    /// Clears the forced-reset flag and rotates the security stamp,
    /// invalidating any other outstanding artifacts.
    ///
    /// # Returns
    /// * `Err(AuthError)` - NotFound if the account is unresolved,
    ///   InvalidOperation if the artifact is invalid or expired
    pub async fn reset_password(
        &self,
        user_name: &str,
        artifact: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let Some(account) = self.accounts.resolve(user_name).await? else {
            return Err(AuthError::not_found());
        };

        self.accounts
            .consume_reset_artifact(&account, artifact, new_password)
            .await?;

        if let Err(audit_err) =
            audit_logger::log_password_reset_completed(&self.audit, &account.id).await
        {
            tracing::error!("Failed to log password reset completion: {:?}", audit_err);
        }

        Ok(())
    }

    /// Validate a session token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.validate(token)
    }

    async fn audit_failure(
        &self,
        account_id: Option<String>,
        reason: &str,
        ip_address: Option<String>,
    ) {
        if let Err(audit_err) =
            audit_logger::log_login_failure(&self.audit, account_id, reason, ip_address).await
        {
            tracing::error!("Failed to log login failure: {:?}", audit_err);
        }
    }
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish()
    }
}
