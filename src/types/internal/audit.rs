use std::collections::HashMap;
use std::fmt;

/// Event types for audit logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    LoginSuccess,
    LoginFailure,
    PasswordResetRequested,
    PasswordResetCompleted,
    RoleSeeded,
    AdminAccountSeeded,
    Custom(String),
}

impl EventType {
    /// String representation for database storage
    pub fn as_str(&self) -> &str {
        match self {
            Self::LoginSuccess => "login_success",
            Self::LoginFailure => "login_failure",
            Self::PasswordResetRequested => "password_reset_requested",
            Self::PasswordResetCompleted => "password_reset_completed",
            Self::RoleSeeded => "role_seeded",
            Self::AdminAccountSeeded => "admin_account_seeded",
            Self::Custom(s) => s.as_str(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit event structure for building and storing audit records
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub event_type: EventType,
    pub account_id: Option<String>,
    pub ip_address: Option<String>,
    pub data: HashMap<String, serde_json::Value>,
}

impl AuditEvent {
    /// Create a new audit event with the specified event type
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            account_id: None,
            ip_address: None,
            data: HashMap::new(),
        }
    }

    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn ip_address(mut self, ip_address: Option<String>) -> Self {
        self.ip_address = ip_address;
        self
    }

    pub fn detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}
