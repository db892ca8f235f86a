//! Typed helpers for building and writing audit events.
//!
//! All callers treat audit writes as best-effort: failures are logged via
//! `tracing` at the call site and never fail the surrounding operation.

use crate::errors::AuditError;
use crate::stores::AuditStore;
use crate::types::internal::audit::{AuditEvent, EventType};

/// Record a successful login
pub async fn log_login_success(
    store: &AuditStore,
    account_id: &str,
    ip_address: Option<String>,
) -> Result<(), AuditError> {
    store
        .write_event(
            AuditEvent::new(EventType::LoginSuccess)
                .account_id(account_id)
                .ip_address(ip_address),
        )
        .await
}

/// Record a failed login attempt
///
/// account_id is absent when no account resolved for the presented name.
pub async fn log_login_failure(
    store: &AuditStore,
    account_id: Option<String>,
    reason: &str,
    ip_address: Option<String>,
) -> Result<(), AuditError> {
    let mut event = AuditEvent::new(EventType::LoginFailure)
        .ip_address(ip_address)
        .detail("reason", reason);
    event.account_id = account_id;

    store.write_event(event).await
}

/// Record that a password-reset artifact was issued
pub async fn log_password_reset_requested(
    store: &AuditStore,
    account_id: &str,
) -> Result<(), AuditError> {
    store
        .write_event(AuditEvent::new(EventType::PasswordResetRequested).account_id(account_id))
        .await
}

/// Record that a password reset completed and the stamp rotated
pub async fn log_password_reset_completed(
    store: &AuditStore,
    account_id: &str,
) -> Result<(), AuditError> {
    store
        .write_event(AuditEvent::new(EventType::PasswordResetCompleted).account_id(account_id))
        .await
}

/// Record that the seeder created a role
pub async fn log_role_seeded(store: &AuditStore, role_name: &str) -> Result<(), AuditError> {
    store
        .write_event(AuditEvent::new(EventType::RoleSeeded).detail("role", role_name))
        .await
}

/// Record that the seeder created the administrator account
pub async fn log_admin_account_seeded(
    store: &AuditStore,
    account_id: &str,
    email: &str,
) -> Result<(), AuditError> {
    store
        .write_event(
            AuditEvent::new(EventType::AdminAccountSeeded)
                .account_id(account_id)
                .detail("email", email),
        )
        .await
}
