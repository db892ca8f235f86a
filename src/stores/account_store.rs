use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::errors::AuthError;
use crate::services::crypto;
use crate::types::db::account::{self, Entity as Account};

/// Fields for provisioning a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: Option<String>,
    pub full_name: String,
    pub password: String,
    pub firm_id: i32,
}

/// AccountStore manages account records, password hashes, and reset artifacts
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create a new AccountStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve an account by exact username, falling back to email
    ///
    /// # Returns
    /// * `Ok(Some(model))` - A matching account
    /// * `Ok(None)` - Neither username nor email matched
    pub async fn resolve(&self, user_name: &str) -> Result<Option<account::Model>, AuthError> {
        if let Some(by_username) = self.find_by_username(user_name).await? {
            return Ok(Some(by_username));
        }
        self.find_by_email(user_name).await
    }

    /// Find an account by exact username
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<account::Model>, AuthError> {
        Account::find()
            .filter(account::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Find an account by email address
    pub async fn find_by_email(&self, email: &str) -> Result<Option<account::Model>, AuthError> {
        Account::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Create a new account with a hashed password and fresh security stamp
    ///
    /// # Returns
    /// * `Ok(model)` - The created account
    /// * `Err(AuthError)` - InvalidOperation on duplicate username/email, or
    ///   InternalError
    pub async fn create_account(&self, new: NewAccount) -> Result<account::Model, AuthError> {
        let existing = self.find_by_username(&new.username).await?;
        if existing.is_some() {
            return Err(AuthError::invalid_operation(format!(
                "username '{}' already exists",
                new.username
            )));
        }

        if let Some(email) = &new.email {
            if self.find_by_email(email).await?.is_some() {
                return Err(AuthError::invalid_operation(format!(
                    "email '{}' already exists",
                    email
                )));
            }
        }

        let password_hash = Self::hash_password(&new.password)?;
        let now = Utc::now().timestamp();

        let model = account::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(new.username.clone()),
            email: Set(new.email),
            full_name: Set(new.full_name),
            password_hash: Set(password_hash),
            security_stamp: Set(Uuid::new_v4().to_string()),
            requires_password_reset: Set(false),
            lockout_until: Set(None),
            firm_id: Set(new.firm_id),
            reset_token_hash: Set(None),
            reset_token_expires_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::invalid_operation(format!("username '{}' already exists", new.username))
            } else {
                AuthError::internal_error(format!("Database error: {}", e))
            }
        })
    }

    /// Verify a plaintext password against the account's stored hash
    pub fn verify_password(&self, account: &account::Model, password: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&account.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Issue a single-use password-reset artifact for an account
    ///
    /// Stores the artifact's digest (keyed by the current security stamp)
    /// plus an expiry; any previously issued artifact is superseded. Returns
    /// the plaintext artifact for delivery to the caller.
    pub async fn issue_reset_artifact(
        &self,
        account: &account::Model,
        ttl_minutes: i64,
    ) -> Result<String, AuthError> {
        let artifact = crypto::generate_reset_artifact();
        let digest = crypto::hmac_sha256_hex(&account.security_stamp, &artifact);
        let now = Utc::now().timestamp();

        let mut active = account.clone().into_active_model();
        active.reset_token_hash = Set(Some(digest));
        active.reset_token_expires_at = Set(Some(now + ttl_minutes * 60));
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        Ok(artifact)
    }

    /// Consume a reset artifact and set a new password
    ///
    /// Verifies the artifact digest and expiry, sets the new hash, clears
    /// the forced-reset flag, clears the artifact columns, and rotates the
    /// security stamp - which invalidates every artifact issued before this
    /// call.
    ///
    /// # Returns
    /// * `Ok(())` - Password updated
    /// * `Err(AuthError)` - InvalidOperation if the artifact is missing,
    ///   mismatched, or expired
    pub async fn consume_reset_artifact(
        &self,
        account: &account::Model,
        artifact: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let stored_digest = account
            .reset_token_hash
            .as_deref()
            .ok_or_else(|| AuthError::invalid_operation("no reset token outstanding"))?;

        let presented_digest = crypto::hmac_sha256_hex(&account.security_stamp, artifact);
        if presented_digest != stored_digest {
            return Err(AuthError::invalid_operation("reset token invalid"));
        }

        let now = Utc::now().timestamp();
        let expires_at = account.reset_token_expires_at.unwrap_or(0);
        if expires_at < now {
            return Err(AuthError::invalid_operation("reset token expired"));
        }

        let password_hash = Self::hash_password(new_password)?;

        let mut active = account.clone().into_active_model();
        active.password_hash = Set(password_hash);
        active.requires_password_reset = Set(false);
        active.reset_token_hash = Set(None);
        active.reset_token_expires_at = Set(None);
        active.security_stamp = Set(Uuid::new_v4().to_string());
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        Ok(())
    }

    /// Hash a password with Argon2id
    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::internal_error(format!("Password hashing error: {}", e)))
    }
}

impl std::fmt::Debug for AccountStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountStore")
            .field("db", &"<connection>")
            .finish()
    }
}
