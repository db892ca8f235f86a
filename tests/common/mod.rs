// Common test utilities for integration tests

use std::sync::Arc;

use migration::{IdentityMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use docket_backend::config::JwtSettings;
use docket_backend::schema::{SchemaEvolution, SqliteCatalog};
use docket_backend::services::{AccountService, TokenService};
use docket_backend::stores::{AccountStore, AuditStore, NewAccount, RoleStore};

/// Creates an in-memory database with identity migrations and schema
/// evolution applied, matching the startup sequence of the server.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    IdentityMigrator::up(&db, None)
        .await
        .expect("Failed to run identity migrations");

    SchemaEvolution::new(SqliteCatalog::new(db.clone()))
        .run()
        .await
        .expect("Failed to run schema evolution");

    db
}

pub fn test_jwt_settings(expire_minutes: i64) -> JwtSettings {
    JwtSettings {
        secret: "test-secret-key-minimum-32-characters-long".to_string(),
        issuer: "docket-backend".to_string(),
        audience: "docket-clients".to_string(),
        expire_minutes,
    }
}

/// Fully wired stores and services over one test database
pub struct TestHarness {
    pub db: DatabaseConnection,
    pub accounts: Arc<AccountStore>,
    pub roles: Arc<RoleStore>,
    pub audit: Arc<AuditStore>,
    pub service: AccountService,
}

pub async fn setup_harness_with_expiry(expire_minutes: i64) -> TestHarness {
    let db = setup_test_db().await;

    let accounts = Arc::new(AccountStore::new(db.clone()));
    let roles = Arc::new(RoleStore::new(db.clone()));
    let audit = Arc::new(AuditStore::new(db.clone()));
    let tokens = Arc::new(TokenService::new(test_jwt_settings(expire_minutes)));

    let service = AccountService::new(
        accounts.clone(),
        roles.clone(),
        tokens.clone(),
        audit.clone(),
    );

    TestHarness {
        db,
        accounts,
        roles,
        audit,
        service,
    }
}

pub async fn setup_harness() -> TestHarness {
    setup_harness_with_expiry(60).await
}

/// Creates an enabled account with no policy flags set
pub async fn create_plain_account(harness: &TestHarness, username: &str, password: &str) {
    harness
        .accounts
        .create_account(NewAccount {
            username: username.to_string(),
            email: Some(format!("{}@example.com", username)),
            full_name: "Test Person".to_string(),
            password: password.to_string(),
            firm_id: 1,
        })
        .await
        .expect("Failed to create test account");
}
