use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::errors::AuthError;
use crate::types::db::account_role::{self, Entity as AccountRole};
use crate::types::db::role::{self, Entity as Role};

/// RoleStore manages the fixed role set and role memberships
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    /// Create a new RoleStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Find a role by its normalized (uppercase) name
    pub async fn find_by_normalized(&self, name: &str) -> Result<Option<role::Model>, AuthError> {
        Role::find()
            .filter(role::Column::NormalizedName.eq(name.to_uppercase()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Create a role if no role with its normalized name exists
    ///
    /// # Returns
    /// * `Ok(model)` - The existing or newly created role
    pub async fn ensure_role(&self, name: &str) -> Result<role::Model, AuthError> {
        if let Some(existing) = self.find_by_normalized(name).await? {
            return Ok(existing);
        }

        let model = role::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(name.to_string()),
            normalized_name: Set(name.to_uppercase()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Check whether an account holds a role
    pub async fn is_in_role(&self, account_id: &str, role_id: i32) -> Result<bool, AuthError> {
        let membership = AccountRole::find_by_id((account_id.to_string(), role_id))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        Ok(membership.is_some())
    }

    /// Add an account to a role; no-op when the membership already exists
    pub async fn assign(&self, account_id: &str, role_id: i32) -> Result<(), AuthError> {
        if self.is_in_role(account_id, role_id).await? {
            return Ok(());
        }

        let membership = account_role::ActiveModel {
            account_id: Set(account_id.to_string()),
            role_id: Set(role_id),
        };

        membership
            .insert(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        Ok(())
    }

    /// Names of all roles assigned to an account, sorted for determinism
    pub async fn roles_for_account(&self, account_id: &str) -> Result<Vec<String>, AuthError> {
        let memberships = AccountRole::find()
            .filter(account_role::Column::AccountId.eq(account_id))
            .all(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        if memberships.is_empty() {
            return Ok(Vec::new());
        }

        let role_ids: Vec<i32> = memberships.iter().map(|m| m.role_id).collect();

        let roles = Role::find()
            .filter(role::Column::Id.is_in(role_ids))
            .all(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        let mut names: Vec<String> = roles.into_iter().map(|r| r.name).collect();
        names.sort();
        Ok(names)
    }
}

impl std::fmt::Debug for RoleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleStore")
            .field("db", &"<connection>")
            .finish()
    }
}
