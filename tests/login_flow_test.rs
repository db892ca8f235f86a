// Login flow policy gates and token contents

mod common;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};

use docket_backend::errors::AuthError;
use docket_backend::types::db::account::{self, Entity as Account};

use common::{create_plain_account, setup_harness, setup_harness_with_expiry};

async fn load_account(
    db: &sea_orm::DatabaseConnection,
    username: &str,
) -> account::Model {
    Account::find()
        .filter(account::Column::Username.eq(username))
        .one(db)
        .await
        .expect("Failed to query account")
        .expect("Account not found")
}

#[tokio::test]
async fn test_login_with_unknown_account_fails_not_found() {
    let harness = setup_harness().await;

    let result = harness.service.login("nonexistent", "whatever", None).await;

    assert!(matches!(result, Err(AuthError::NotFound(_))));
}

#[tokio::test]
async fn test_login_resolves_by_email_when_username_misses() {
    let harness = setup_harness().await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let result = harness
        .service
        .login("jdoe@example.com", "testpass", None)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_forced_reset_gate_fires_regardless_of_password() {
    let harness = setup_harness().await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let mut active = load_account(&harness.db, "jdoe").await.into_active_model();
    active.requires_password_reset = Set(true);
    active.update(&harness.db).await.unwrap();

    // Correct password
    let correct = harness.service.login("jdoe", "testpass", None).await;
    assert!(matches!(correct, Err(AuthError::PasswordResetRequired(_))));

    // Wrong password hits the same gate first
    let wrong = harness.service.login("jdoe", "wrongpass", None).await;
    assert!(matches!(wrong, Err(AuthError::PasswordResetRequired(_))));
}

#[tokio::test]
async fn test_future_lockout_disables_login() {
    let harness = setup_harness().await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let mut active = load_account(&harness.db, "jdoe").await.into_active_model();
    active.lockout_until = Set(Some(Utc::now().timestamp() + 3600));
    active.update(&harness.db).await.unwrap();

    let result = harness.service.login("jdoe", "testpass", None).await;

    assert!(matches!(result, Err(AuthError::AccountDisabled(_))));
}

#[tokio::test]
async fn test_expired_lockout_does_not_gate() {
    let harness = setup_harness().await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let mut active = load_account(&harness.db, "jdoe").await.into_active_model();
    active.lockout_until = Set(Some(Utc::now().timestamp() - 3600));
    active.update(&harness.db).await.unwrap();

    let result = harness.service.login("jdoe", "testpass", None).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_wrong_password_fails_invalid_credentials() {
    let harness = setup_harness().await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let result = harness.service.login("jdoe", "wrongpass", None).await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
}

#[tokio::test]
async fn test_token_claims_carry_subject_and_roles() {
    let harness = setup_harness().await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let account = load_account(&harness.db, "jdoe").await;
    let admin = harness.roles.ensure_role("Admin").await.unwrap();
    let employee = harness.roles.ensure_role("Employee").await.unwrap();
    harness.roles.assign(&account.id, admin.id).await.unwrap();
    harness.roles.assign(&account.id, employee.id).await.unwrap();

    let issued = harness
        .service
        .login("jdoe", "testpass", None)
        .await
        .expect("Login should succeed");

    let claims = harness
        .service
        .validate_token(&issued.token)
        .expect("Token should validate");

    assert_eq!(claims.sub, account.id);
    assert_eq!(claims.unique_name, "jdoe");
    assert_eq!(claims.roles.len(), 2);
    assert!(claims.roles.contains(&"Admin".to_string()));
    assert!(claims.roles.contains(&"Employee".to_string()));
    assert_eq!(claims.email.as_deref(), Some("jdoe@example.com"));
}

#[tokio::test]
async fn test_token_expiry_matches_configured_minutes() {
    let harness = setup_harness_with_expiry(15).await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let before = Utc::now().timestamp();
    let issued = harness.service.login("jdoe", "testpass", None).await.unwrap();
    let after = Utc::now().timestamp();

    assert!(issued.expires >= before + 15 * 60);
    assert!(issued.expires <= after + 15 * 60);
}

#[tokio::test]
async fn test_token_expiry_clamps_to_60_minutes_when_unset() {
    let harness = setup_harness_with_expiry(0).await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let before = Utc::now().timestamp();
    let issued = harness.service.login("jdoe", "testpass", None).await.unwrap();
    let after = Utc::now().timestamp();

    assert!(issued.expires >= before + 60 * 60);
    assert!(issued.expires <= after + 60 * 60);
}

#[tokio::test]
async fn test_password_reset_flow_clears_forced_reset() {
    let harness = setup_harness().await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let mut active = load_account(&harness.db, "jdoe").await.into_active_model();
    active.requires_password_reset = Set(true);
    active.update(&harness.db).await.unwrap();

    // Locked out of login until the reset completes
    let gated = harness.service.login("jdoe", "testpass", None).await;
    assert!(matches!(gated, Err(AuthError::PasswordResetRequired(_))));

    let artifact = harness
        .service
        .request_password_reset("jdoe")
        .await
        .expect("Reset request should succeed");

    harness
        .service
        .reset_password("jdoe", &artifact, "new-password-123")
        .await
        .expect("Reset should succeed");

    let result = harness
        .service
        .login("jdoe", "new-password-123", None)
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_reset_request_for_unknown_account_fails_not_found() {
    let harness = setup_harness().await;

    let result = harness.service.request_password_reset("nonexistent").await;

    assert!(matches!(result, Err(AuthError::NotFound(_))));
}

#[tokio::test]
async fn test_reset_with_bogus_artifact_fails_invalid_operation() {
    let harness = setup_harness().await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    harness
        .service
        .request_password_reset("jdoe")
        .await
        .expect("Reset request should succeed");

    let result = harness
        .service
        .reset_password("jdoe", "forged-artifact", "new-password")
        .await;

    assert!(matches!(result, Err(AuthError::InvalidOperation(_))));
}

#[tokio::test]
async fn test_stamp_rotation_invalidates_earlier_artifact() {
    let harness = setup_harness().await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let first = harness.service.request_password_reset("jdoe").await.unwrap();

    harness
        .service
        .reset_password("jdoe", &first, "first-new-password")
        .await
        .expect("First reset should succeed");

    // The consumed artifact cannot be replayed after the stamp rotated
    let replay = harness
        .service
        .reset_password("jdoe", &first, "second-new-password")
        .await;

    assert!(matches!(replay, Err(AuthError::InvalidOperation(_))));
}

#[tokio::test]
async fn test_newer_artifact_supersedes_older() {
    let harness = setup_harness().await;
    create_plain_account(&harness, "jdoe", "testpass").await;

    let first = harness.service.request_password_reset("jdoe").await.unwrap();
    let second = harness.service.request_password_reset("jdoe").await.unwrap();

    // Only the newest outstanding artifact is honored
    let stale = harness
        .service
        .reset_password("jdoe", &first, "new-password")
        .await;
    assert!(matches!(stale, Err(AuthError::InvalidOperation(_))));

    let fresh = harness
        .service
        .reset_password("jdoe", &second, "new-password")
        .await;
    assert!(fresh.is_ok());
}
