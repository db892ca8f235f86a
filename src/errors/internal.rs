use thiserror::Error;

/// Errors from the schema evolution helper
///
/// Any of these is fatal at startup - the helper runs before the server
/// accepts traffic and there is no rollback.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("database connection failed: {source}")]
    Connection {
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("migration failed: {source}")]
    Migration {
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("catalog query failed for '{object}': {source}")]
    Catalog {
        object: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("DDL execution failed ({statement}): {source}")]
    Ddl {
        statement: String,
        #[source]
        source: sea_orm::DbErr,
    },
}

impl SchemaError {
    pub fn connection(source: sea_orm::DbErr) -> Self {
        Self::Connection { source }
    }

    pub fn migration(source: sea_orm::DbErr) -> Self {
        Self::Migration { source }
    }

    pub fn catalog(object: &str, source: sea_orm::DbErr) -> Self {
        Self::Catalog {
            object: object.to_string(),
            source,
        }
    }

    pub fn ddl(statement: &str, source: sea_orm::DbErr) -> Self {
        Self::Ddl {
            statement: statement.to_string(),
            source,
        }
    }
}

/// Errors from the admin seeder
///
/// Seeding is best-effort; callers log these and continue startup.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("seed lookup '{operation}' failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("account provisioning failed: {0}")]
    Provisioning(String),
}

impl SeedError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.to_string(),
            source,
        }
    }
}

/// Errors from audit event persistence
///
/// Never propagated past the logging call sites.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("failed to serialize audit data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to write audit event: {0}")]
    Write(#[source] sea_orm::DbErr),
}
