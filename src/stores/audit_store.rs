use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::errors::AuditError;
use crate::types::db::audit_event;
use crate::types::internal::audit::AuditEvent;

/// Repository for audit event storage operations
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    /// Create a new AuditStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Write an audit event to the database
    ///
    /// Serializes the data map to JSON and inserts the event into the
    /// audit_events table. account_id is optional for events like login
    /// failures where no account resolved.
    pub async fn write_event(&self, event: AuditEvent) -> Result<(), AuditError> {
        let data_json = serde_json::to_string(&event.data)?;

        let record = audit_event::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            timestamp: Set(Utc::now().to_rfc3339()),
            event_type: Set(event.event_type.to_string()),
            account_id: Set(event.account_id),
            ip_address: Set(event.ip_address),
            data: Set(data_json),
        };

        record.insert(&self.db).await.map_err(AuditError::Write)?;

        Ok(())
    }
}

impl std::fmt::Debug for AuditStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditStore")
            .field("db", &"<connection>")
            .finish()
    }
}
