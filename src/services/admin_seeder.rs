use std::sync::Arc;

use crate::config::AdminSeedSettings;
use crate::errors::SeedError;
use crate::services::audit_logger;
use crate::stores::{AccountStore, AuditStore, NewAccount, RoleStore};

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_EMPLOYEE: &str = "Employee";
pub const ROLE_CUSTOMER: &str = "Customer";

/// The fixed role set, created once if absent
pub const SEED_ROLES: [&str; 3] = [ROLE_ADMIN, ROLE_EMPLOYEE, ROLE_CUSTOMER];

/// Firm the seeded administrator belongs to
const SEED_FIRM_ID: i32 = 1;

/// Guarantees the baseline roles and one administrator account exist
///
/// Runs once at startup, after schema evolution. Best-effort: individual
/// step failures are logged and do not abort startup. The admin password is
/// set only when the account is created, never overwritten on later runs.
pub struct AdminSeeder {
    accounts: Arc<AccountStore>,
    roles: Arc<RoleStore>,
    audit: Arc<AuditStore>,
    settings: AdminSeedSettings,
}

impl AdminSeeder {
    /// Create a new AdminSeeder
    pub fn new(
        accounts: Arc<AccountStore>,
        roles: Arc<RoleStore>,
        audit: Arc<AuditStore>,
        settings: AdminSeedSettings,
    ) -> Self {
        Self {
            accounts,
            roles,
            audit,
            settings,
        }
    }

    /// Run the seeding pass
    pub async fn run(&self) -> Result<(), SeedError> {
        self.ensure_roles().await;
        self.ensure_admin_account().await?;
        Ok(())
    }

    /// Create each baseline role if a role with its normalized name is absent
    async fn ensure_roles(&self) {
        for role_name in SEED_ROLES {
            match self.roles.find_by_normalized(role_name).await {
                Ok(Some(_)) => continue,
                Ok(None) => match self.roles.ensure_role(role_name).await {
                    Ok(_) => {
                        tracing::info!("Seeded role '{}'", role_name);
                        if let Err(audit_err) =
                            audit_logger::log_role_seeded(&self.audit, role_name).await
                        {
                            tracing::error!("Failed to log role seeding: {:?}", audit_err);
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to seed role '{}': {}", role_name, e);
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to look up role '{}': {}", role_name, e);
                }
            }
        }
    }

    /// Create the administrator account if absent; always re-ensure the
    /// Admin role membership
    async fn ensure_admin_account(&self) -> Result<(), SeedError> {
        let email = &self.settings.email;

        let existing = self
            .accounts
            .find_by_email(email)
            .await
            .map_err(|e| SeedError::Provisioning(format!("admin lookup failed: {}", e)))?;

        let account = match existing {
            Some(account) => {
                // The password is deliberately left untouched on restart.
                tracing::debug!("Administrator account already present");
                account
            }
            None => {
                let created = match self
                    .accounts
                    .create_account(NewAccount {
                        username: email.clone(),
                        email: Some(email.clone()),
                        full_name: "Administrator".to_string(),
                        password: self.settings.password.clone(),
                        firm_id: SEED_FIRM_ID,
                    })
                    .await
                {
                    Ok(created) => created,
                    Err(e) => {
                        // Best-effort: log and leave the rest of startup alone
                        tracing::error!("Failed to create administrator account: {}", e);
                        return Ok(());
                    }
                };

                tracing::info!("Seeded administrator account");
                if let Err(audit_err) =
                    audit_logger::log_admin_account_seeded(&self.audit, &created.id, email).await
                {
                    tracing::error!("Failed to log admin seeding: {:?}", audit_err);
                }

                created
            }
        };

        match self.roles.find_by_normalized(ROLE_ADMIN).await {
            Ok(Some(admin_role)) => {
                if let Err(e) = self.roles.assign(&account.id, admin_role.id).await {
                    tracing::error!("Failed to assign Admin role: {}", e);
                }
            }
            Ok(None) => {
                tracing::error!("Admin role missing after role seeding");
            }
            Err(e) => {
                tracing::error!("Failed to look up Admin role: {}", e);
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for AdminSeeder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeeder")
            .field("settings", &self.settings)
            .finish()
    }
}
